pub mod report_request;
pub mod section;
