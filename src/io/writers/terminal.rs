use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;

use crate::formatting::{money, percent, FormattingConfig, Palette};
use crate::io::{OutputWriter, Report};

pub struct TerminalWriter<W: Write> {
    writer: W,
    palette: Palette,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            palette: Palette::new(formatting),
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.palette.uses_color() {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn signed_cell(&self, value: f64, text: String) -> Cell {
        let cell = Cell::new(text).set_alignment(CellAlignment::Right);
        match (self.palette.uses_color(), value) {
            (true, v) if v > 0.0 => cell.fg(Color::Green),
            (true, v) if v < 0.0 => cell.fg(Color::Red),
            _ => cell,
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_roi_table(report)?;
        self.write_test_cases(report)?;
        self.write_summary(report)?;
        self.write_failures(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        let divider = "═══════════════════════════════════════════";
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.palette.header(divider))?;
        writeln!(self.writer, "{}", self.palette.header("         QA AUTOMATION ROI REPORT"))?;
        writeln!(self.writer, "{}", self.palette.header(divider))?;
        writeln!(
            self.writer,
            "{}",
            self.palette.dim(&format!(
                "What-if automation cost multiplier: {:.2}x",
                report.what_if_multiplier
            ))
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_roi_table(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.records.is_empty() {
            writeln!(self.writer, "No stories analysed.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut table = self.table();
        table.set_header(vec![
            "User Story",
            "Manual",
            "Automation",
            "ROI",
            "Break-even",
            "What-if ROI",
            "Suitability",
            "Decision",
        ]);
        for record in &report.records {
            table.add_row(vec![
                Cell::new(&record.user_story),
                Cell::new(money(record.roi.manual_testing_cost)).set_alignment(CellAlignment::Right),
                Cell::new(money(record.roi.automation_testing_cost))
                    .set_alignment(CellAlignment::Right),
                self.signed_cell(record.roi.roi_percentage, percent(record.roi.roi_percentage)),
                Cell::new(format!("{:.1}", record.roi.break_even_cycles))
                    .set_alignment(CellAlignment::Right),
                self.signed_cell(record.what_if.what_if_roi, percent(record.what_if.what_if_roi)),
                Cell::new(format!("{}/100", record.automation_suitability_score))
                    .set_alignment(CellAlignment::Right),
                Cell::new(self.palette.decision(record.automation_recommended)),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        for record in &report.records {
            for warning in &record.roi.warnings {
                let line = format!("⚠ {}: {}", record.user_story, warning);
                writeln!(self.writer, "{}", self.palette.warning(&line))?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_test_cases(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.test_cases.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{}", self.palette.header("Test Cases"))?;
        let mut table = self.table();
        table.set_header(vec!["User Story", "Title", "Priority", "Steps"]);
        for case in &report.test_cases {
            table.add_row(vec![
                Cell::new(&case.user_story),
                Cell::new(case.display_title()),
                Cell::new(&case.priority),
                Cell::new(case.steps.len()).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        let summary = &report.summary;

        writeln!(self.writer, "{}", self.palette.header("ROI Summary"))?;
        writeln!(self.writer, "  Stories analysed:      {}", summary.story_count)?;
        writeln!(
            self.writer,
            "  Total manual cost:     {}",
            money(summary.total_manual_cost)
        )?;
        writeln!(
            self.writer,
            "  Total automation cost: {}",
            money(summary.total_automation_cost)
        )?;
        writeln!(
            self.writer,
            "  Net savings:           {}",
            self.palette
                .signed(summary.net_savings, &money(summary.net_savings))
        )?;
        writeln!(
            self.writer,
            "  Average ROI:           {}",
            self.palette
                .signed(summary.average_roi, &percent(summary.average_roi))
        )?;
        writeln!(
            self.writer,
            "  Recommended:           {} of {}",
            summary.recommended_count, summary.story_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_failures(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.failures.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "{}",
            self.palette
                .warning(&format!("{} stories failed:", report.failures.len()))
        )?;
        for failure in &report.failures {
            writeln!(self.writer, "  - {}: {}", failure.user_story, failure.error)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}
