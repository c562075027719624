use serde::{Deserialize, Serialize};

use super::section::Section;

/// Body of `POST /generate-pdf`: one raw text block per report section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    pub executive_summary: String,
    pub portfolio_summary: String,
    pub tax_loss_harvesting_analysis: String,
    pub reinvestment_strategy: String,
    pub portfolio_outlook: String,
    pub actionable_next_steps: String,
    pub irs_compliance_warning: String,
}

impl GenerateReportRequest {
    /// User-supplied sections in declaration order, titled from field names.
    pub fn sections(&self) -> Vec<Section> {
        [
            ("executive_summary", &self.executive_summary),
            ("portfolio_summary", &self.portfolio_summary),
            (
                "tax_loss_harvesting_analysis",
                &self.tax_loss_harvesting_analysis,
            ),
            ("reinvestment_strategy", &self.reinvestment_strategy),
            ("portfolio_outlook", &self.portfolio_outlook),
            ("actionable_next_steps", &self.actionable_next_steps),
            ("irs_compliance_warning", &self.irs_compliance_warning),
        ]
        .into_iter()
        .map(|(field, body)| Section::new(title_case(field), body.as_str()))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportResponse {
    pub message: String,
    pub file_url: String,
}

impl GenerateReportResponse {
    pub const SUCCESS_MESSAGE: &'static str = "PDF generated successfully";

    pub fn success(file_url: impl Into<String>) -> Self {
        Self {
            message: Self::SUCCESS_MESSAGE.to_string(),
            file_url: file_url.into(),
        }
    }
}

/// `tax_loss_harvesting_analysis` → `Tax Loss Harvesting Analysis`.
pub fn title_case(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
