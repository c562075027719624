//! Fixed report content owned by the service rather than the caller.

use crate::models::report_request::GenerateReportRequest;
use crate::models::section::Section;

pub const REPORT_TITLE: &str = "Harvest & Invest: Portfolio Optimization Report";

pub const ABOUT_TITLE: &str = "About This Report";

pub const ABOUT_TEXT: &str = "This report outlines a strategy for optimizing your portfolio through \
tax-loss harvesting (TLH) and reinvestment. It is designed to align with your aggressive risk \
tolerance, sector preferences, and growth-oriented investment goals.";

pub const DISCLAIMER_TITLE: &str = "Disclaimer";

pub const DISCLAIMER_TEXT: &str = "This report is provided for informational purposes only and is \
based on the data and preferences you have shared. The recommendations contained herein are \
intended to assist in optimizing your portfolio in alignment with your stated investment goals, \
risk tolerance, and financial objectives.

Market Risks: All investments involve risk, including the potential loss of principal. Past \
performance is not indicative of future results.
Tax Considerations: Tax-loss harvesting recommendations are based on current IRS guidelines, \
which are subject to change. Consult a qualified tax advisor.
No Guarantees: There is no guarantee that recommendations will achieve the desired outcomes.
Dynamic Market Conditions: This report does not account for unforeseen market fluctuations or \
macroeconomic factors.

Consult with legal, tax, and financial advisors before acting on any recommendations provided \
in this report.";

/// Sections rendered ahead of the caller's content.
pub fn fixed_sections() -> Vec<Section> {
    vec![Section::new(ABOUT_TITLE, ABOUT_TEXT)]
}

pub fn disclaimer_section() -> Section {
    Section::disclaimer(DISCLAIMER_TITLE, DISCLAIMER_TEXT)
}

/// Full render order: fixed sections, then the request's sections, then the
/// disclaimer.
pub fn report_sections(request: &GenerateReportRequest) -> Vec<Section> {
    let mut sections = fixed_sections();
    sections.extend(request.sections());
    sections.push(disclaimer_section());
    sections
}
