use harvest_core::content::{self, DISCLAIMER_TITLE, report_sections};
use harvest_core::models::report_request::{
    GenerateReportRequest, GenerateReportResponse, title_case,
};
use harvest_core::s3_keys;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn sample_request() -> GenerateReportRequest {
    serde_json::from_value(serde_json::json!({
        "executive_summary": "Summary",
        "portfolio_summary": "Holdings",
        "tax_loss_harvesting_analysis": "| A | B |\n|---|---|\n| 1 | 2 |",
        "reinvestment_strategy": "Reinvest",
        "portfolio_outlook": "Outlook",
        "actionable_next_steps": "Steps",
        "irs_compliance_warning": "Wash sales",
    }))
    .unwrap()
}

#[test]
fn title_case_matches_field_names() {
    assert_eq!(title_case("executive_summary"), "Executive Summary");
    assert_eq!(
        title_case("tax_loss_harvesting_analysis"),
        "Tax Loss Harvesting Analysis"
    );
    assert_eq!(title_case("irs_compliance_warning"), "Irs Compliance Warning");
    assert_eq!(title_case("ALREADY_upper"), "Already Upper");
}

#[test]
fn request_sections_keep_declaration_order() {
    let titles: Vec<String> = sample_request()
        .sections()
        .into_iter()
        .map(|s| s.title)
        .collect();

    assert_eq!(
        titles,
        vec![
            "Executive Summary",
            "Portfolio Summary",
            "Tax Loss Harvesting Analysis",
            "Reinvestment Strategy",
            "Portfolio Outlook",
            "Actionable Next Steps",
            "Irs Compliance Warning",
        ]
    );
}

#[test]
fn report_sections_wrap_user_content() {
    let sections = report_sections(&sample_request());

    assert_eq!(sections.len(), 9);
    assert_eq!(sections[0].title, content::ABOUT_TITLE);
    assert!(!sections[0].is_disclaimer);

    let last = sections.last().unwrap();
    assert_eq!(last.title, DISCLAIMER_TITLE);
    assert!(last.is_disclaimer);
    assert!(sections[..8].iter().all(|s| !s.is_disclaimer));
}

#[test]
fn missing_field_is_rejected() {
    let result = serde_json::from_value::<GenerateReportRequest>(serde_json::json!({
        "executive_summary": "only one",
    }));
    assert!(result.is_err());
}

#[test]
fn response_serializes_message_and_url() {
    let body = serde_json::to_value(GenerateReportResponse::success("https://x/y.pdf")).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "message": "PDF generated successfully",
            "file_url": "https://x/y.pdf",
        })
    );
}

#[test]
fn report_keys_are_unique_per_id() {
    let a = s3_keys::report_pdf(Uuid::new_v4());
    let b = s3_keys::report_pdf(Uuid::new_v4());
    assert_ne!(a, b);
    assert!(a.starts_with("Portfolio_Optimization_Report_"));
    assert!(a.ends_with(".pdf"));
}
