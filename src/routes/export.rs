use axum::Json;
use serde::Serialize;

use crate::constants::{MSG_DATA_EXPORTED, SHEET_HEADER};
use crate::error::Result;
use crate::models::{iso_timestamp, ApiResponse, SignupRecord};
use crate::AppState;

/// Export payload: the whole sheet as one CSV string
#[derive(Debug, Serialize)]
pub struct ExportPayload {
    pub csv: String,
    #[serde(rename = "totalRecords")]
    pub total_records: u64,
}

/// Export action. Everything goes out in a single response; small
/// datasets only, no pagination.
pub async fn export_data(state: AppState) -> Result<Json<ApiResponse>> {
    let store = state.store.clone();
    let rows = tokio::task::spawn_blocking(move || store.all_rows()).await??;

    let payload = ExportPayload {
        total_records: rows.len() as u64,
        csv: render_csv(&rows),
    };

    Ok(Json(ApiResponse::ok(MSG_DATA_EXPORTED).with_data(payload)))
}

/// Render the header and every row. Cells containing the delimiter are
/// wrapped in quotes; embedded quotes are left alone, which the consumer
/// tolerates.
pub fn render_csv(rows: &[SignupRecord]) -> String {
    let mut csv = String::new();
    push_line(&mut csv, SHEET_HEADER.iter().map(|cell| cell.to_string()));

    for row in rows {
        push_line(
            &mut csv,
            [
                iso_timestamp(row.created_at),
                row.email.clone(),
                row.source.clone(),
                row.user_agent.clone(),
                row.referrer.clone(),
                row.screen_resolution.clone(),
                row.timezone.clone(),
            ]
            .into_iter(),
        );
    }
    csv
}

fn push_line(csv: &mut String, cells: impl Iterator<Item = String>) {
    let line = cells
        .map(|cell| {
            if cell.contains(',') {
                format!("\"{cell}\"")
            } else {
                cell
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&line);
    csv.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_record;

    #[test]
    fn test_header_only_for_empty_store() {
        let csv = render_csv(&[]);
        assert_eq!(
            csv,
            "Timestamp,Email,Source,User Agent,Referrer,Screen Resolution,Timezone\n"
        );
    }

    #[test]
    fn test_one_line_per_row() {
        let rows = vec![
            sample_record("a@b.com", 0),
            sample_record("c@d.com", 1_700_000_000),
        ];

        let csv = render_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1970-01-01T00:00:00.000Z,a@b.com,"));
        assert!(lines[2].starts_with("2023-11-14T22:13:20.000Z,c@d.com,"));
    }

    #[test]
    fn test_cells_with_commas_are_quoted() {
        let mut row = sample_record("a@b.com", 0);
        row.user_agent = "Mozilla/5.0 (X11, Linux)".to_string();

        let csv = render_csv(&[row]);
        assert!(csv.contains("\"Mozilla/5.0 (X11, Linux)\""));
    }
}
