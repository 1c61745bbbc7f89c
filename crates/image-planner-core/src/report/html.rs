use crate::analysis::Report;
use crate::error::Result;
use crate::model::{NodeType, ReportItem};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::io::Write;

pub struct HtmlReportWriter<W: Write> {
    writer: W,
    template: &'static str,
}

impl<W: Write> HtmlReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            template: include_str!("templates/report.html"),
        }
    }

    pub fn write_report(&mut self, report: &Report) -> Result<()> {
        let html = self.render_html(report);
        self.writer.write_all(html.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn render_html(&self, report: &Report) -> String {
        self.template
            .replace("{{{STAT_POINTS}}}", &report.points.to_string())
            .replace("{{{STAT_PERCENT}}}", &report.percentage.to_string())
            .replace(
                "{{{TIMESTAMP}}}",
                &report.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            )
            .replace("{{{REPORT_ROWS}}}", &render_rows(&report.items))
    }
}

fn render_rows(items: &[ReportItem]) -> String {
    let mut rows = String::new();
    for item in items {
        let parent = item.parent_id.map(|id| id.to_string()).unwrap_or_default();
        let name = encode_text(&item.name);

        let name_cell = match (&item.node_type, &item.image_url) {
            (NodeType::Task, Some(url)) => format!(
                "<a href=\"{}\" target=\"_blank\">{}</a>",
                encode_double_quoted_attribute(url),
                name
            ),
            (NodeType::Task, None) => name.to_string(),
            _ => format!("<span class=\"toggle\">&#9662;</span>{}", name),
        };

        let points = match item.node_type {
            NodeType::Task => String::new(),
            _ => item.points.to_string(),
        };

        // Writing to a String cannot fail
        let _ = writeln!(
            rows,
            "    <tr class=\"{}\" data-id=\"{}\" data-parent=\"{}\"><td class=\"name\">{}</td><td class=\"points\">{}</td><td class=\"percent\"><span class=\"bar\"><span style=\"width: {}%\"></span></span>{}%</td></tr>",
            item.node_type,
            item.id,
            parent,
            name_cell,
            points,
            item.percentage,
            item.percentage,
        );
    }
    rows
}
