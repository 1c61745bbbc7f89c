pub mod html;

pub use html::HtmlReportWriter;
