//! HTTP client for the spreadsheet values API.

use caseintake_core::SHEETS_HTTP_TIMEOUT_SECS;
use chrono::Utc;
use serde_json::Value;

use crate::error::SheetsError;
use crate::mapping::{column_letter, header_index_map, headers, plan_step_cells};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Client for one spreadsheet used as the case mirror.
pub struct SheetsClient {
    client: reqwest::Client,
    token: String,
    spreadsheet_id: String,
    sheet_name: String,
    base_url: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("token", &"***")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Creates a new client with a bounded request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        token: String,
        spreadsheet_id: String,
        sheet_name: String,
    ) -> Result<Self, SheetsError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(SHEETS_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| SheetsError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            token,
            spreadsheet_id,
            sheet_name,
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base URL (self-hosted proxies, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Reflect one committed step submission into the sheet.
    ///
    /// Looks the case row up by the identity column, then either appends a
    /// new row or read-modify-writes the existing one so unrelated columns
    /// survive. The "Last input" column is stamped on every write.
    ///
    /// # Errors
    /// Any API or schema failure; callers downgrade these to warnings.
    pub async fn mirror_case(
        &self,
        case_id: &str,
        step_key: &str,
        payload: &Value,
    ) -> Result<(), SheetsError> {
        let header_row = self
            .get_values(&format!("{}!1:1", self.sheet_name))
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();
        let columns = header_index_map(&header_row);
        let Some(&id_col) = columns.get(headers::CASE_ID) else {
            return Err(SheetsError::SchemaDrift(format!(
                "identity column '{}' not found in header row",
                headers::CASE_ID
            )));
        };

        let id_letter = column_letter(id_col);
        let id_cells = self
            .get_values(&format!("{}!{}:{}", self.sheet_name, id_letter, id_letter))
            .await?;
        // Row numbers are 1-based; skip the header row when matching.
        let existing_row = id_cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().is_some_and(|cell| cell == case_id))
            .map(|(i, _)| i + 1);

        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        match existing_row {
            None => {
                let mut row = vec![String::new(); header_row.len()];
                row[id_col] = case_id.to_owned();
                set_cell(&mut row, &columns, headers::CURRENT_STEP, step_key.to_owned());
                set_cell(&mut row, &columns, headers::CREATED, now.clone());
                set_cell(&mut row, &columns, headers::LAST_INPUT, now);
                for (header, text) in plan_step_cells(payload, false) {
                    set_cell(&mut row, &columns, header, text);
                }
                self.append_row(&row).await?;
                tracing::debug!(case_id, step_key, "mirror appended new case row");
            },
            Some(row_number) => {
                let mut row = self
                    .get_values(&format!("{}!{row_number}:{row_number}", self.sheet_name))
                    .await?
                    .into_iter()
                    .next()
                    .unwrap_or_default();
                row.resize(header_row.len(), String::new());
                set_cell(&mut row, &columns, headers::CURRENT_STEP, step_key.to_owned());
                set_cell(&mut row, &columns, headers::LAST_INPUT, now);
                for (header, text) in plan_step_cells(payload, true) {
                    set_cell(&mut row, &columns, header, text);
                }
                self.update_row(row_number, &row).await?;
                tracing::debug!(case_id, step_key, row_number, "mirror updated case row");
            },
        }
        Ok(())
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!("{}/{}/values/{range}", self.base_url, self.spreadsheet_id);
        let body = self.send(self.client.get(&url)).await?;
        let parsed: Value =
            serde_json::from_str(&body).map_err(|e| SheetsError::JsonParse {
                context: format!("values response for {range}"),
                source: e,
            })?;
        let rows = parsed
            .get("values")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| {
                                cells
                                    .iter()
                                    .map(|c| c.as_str().map_or_else(|| c.to_string(), ToOwned::to_owned))
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn append_row(&self, row: &[String]) -> Result<(), SheetsError> {
        let url = format!(
            "{}/{}/values/{}!A1:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.base_url, self.spreadsheet_id, self.sheet_name
        );
        let body = serde_json::json!({ "values": [row] });
        self.send(self.client.post(&url).json(&body)).await?;
        Ok(())
    }

    async fn update_row(&self, row_number: usize, row: &[String]) -> Result<(), SheetsError> {
        let url = format!(
            "{}/{}/values/{}!A{row_number}?valueInputOption=RAW",
            self.base_url, self.spreadsheet_id, self.sheet_name
        );
        let body = serde_json::json!({ "values": [row] });
        self.send(self.client.put(&url).json(&body)).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, SheetsError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SheetsError::HttpStatus { code: status.as_u16(), body });
        }
        Ok(body)
    }
}

fn set_cell(
    row: &mut [String],
    columns: &std::collections::HashMap<String, usize>,
    header: &str,
    text: String,
) {
    if let Some(&index) = columns.get(header) {
        if let Some(cell) = row.get_mut(index) {
            *cell = text;
        }
    }
}
