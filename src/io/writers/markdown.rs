use crate::formatting::{money, percent};
use crate::io::{OutputWriter, Report};
use std::io::Write;

const BAR_WIDTH: usize = 30;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &Report) -> anyhow::Result<()>> = vec![
            |w, r| w.write_header(r),
            |w, r| w.write_roi_details(r),
            |w, r| w.write_test_cases(r),
            |w, r| w.write_decisions(r),
            |w, r| w.write_summary(r),
            |w, r| w.write_cost_chart(r),
            |w, r| w.write_failures(r),
        ];

        writers.iter().try_for_each(|writer| writer(self, report))
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# QA Automation ROI Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.writer,
            "What-if automation cost multiplier: {:.2}x",
            report.what_if_multiplier
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_roi_details(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "## ROI Details")?;
        writeln!(self.writer)?;

        if report.records.is_empty() {
            writeln!(self.writer, "_No stories analysed._")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "| User Story | Manual Cost | Automation Cost | ROI | Break-even Cycles | What-if Cost | What-if ROI | Confidence |"
        )?;
        writeln!(
            self.writer,
            "|------------|-------------|-----------------|-----|-------------------|--------------|-------------|------------|"
        )?;
        for record in &report.records {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {:.1} | {} | {} | {:.0}% |",
                escape_cell(&record.user_story),
                money(record.roi.manual_testing_cost),
                money(record.roi.automation_testing_cost),
                percent(record.roi.roi_percentage),
                record.roi.break_even_cycles,
                money(record.what_if.what_if_automation_cost),
                percent(record.what_if.what_if_roi),
                record.estimation_confidence,
            )?;
        }
        writeln!(self.writer)?;

        for record in report.records.iter().filter(|r| !r.roi.warnings.is_empty()) {
            for warning in &record.roi.warnings {
                writeln!(
                    self.writer,
                    "> **Note** ({}): {}",
                    escape_cell(&record.user_story),
                    warning
                )?;
            }
        }

        let reasoned: Vec<_> = report
            .records
            .iter()
            .filter_map(|r| r.estimation_reasoning.as_deref().map(|text| (r, text)))
            .collect();
        if !reasoned.is_empty() {
            writeln!(self.writer, "### Estimation Reasoning")?;
            writeln!(self.writer)?;
            for (record, reasoning) in reasoned {
                writeln!(self.writer, "- **{}**: {}", record.user_story, reasoning)?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_test_cases(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.test_cases.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Test Cases")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| User Story | Title | Priority | Steps | Expected Result |"
        )?;
        writeln!(
            self.writer,
            "|------------|-------|----------|-------|-----------------|"
        )?;
        for case in &report.test_cases {
            let steps = case
                .steps
                .iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {}", i + 1, escape_cell(step)))
                .collect::<Vec<_>>()
                .join("<br>");
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                escape_cell(&case.user_story),
                escape_cell(case.display_title()),
                escape_cell(&case.priority),
                steps,
                escape_cell(&case.expected_result),
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_decisions(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.records.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Automation Decisions")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| User Story | ROI | Suitability | Decision |")?;
        writeln!(self.writer, "|------------|-----|-------------|----------|")?;
        for row in report.decisions() {
            writeln!(
                self.writer,
                "| {} | {} | {}/100 | {} |",
                escape_cell(&row.user_story),
                percent(row.roi_percentage),
                row.automation_suitability_score,
                if row.automation_recommended {
                    "Automate"
                } else {
                    "Keep manual"
                },
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        let summary = &report.summary;

        writeln!(self.writer, "## ROI Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Stories analysed | {} |", summary.story_count)?;
        writeln!(
            self.writer,
            "| Total manual cost | {} |",
            money(summary.total_manual_cost)
        )?;
        writeln!(
            self.writer,
            "| Total automation cost | {} |",
            money(summary.total_automation_cost)
        )?;
        writeln!(self.writer, "| Net savings | {} |", money(summary.net_savings))?;
        writeln!(self.writer, "| Average ROI | {} |", percent(summary.average_roi))?;
        writeln!(
            self.writer,
            "| Recommended for automation | {} of {} |",
            summary.recommended_count, summary.story_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_cost_chart(&mut self, report: &Report) -> anyhow::Result<()> {
        let max = report.max_cost();
        if report.records.is_empty() || max <= 0.0 {
            return Ok(());
        }

        writeln!(self.writer, "## Manual vs Automation Cost")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "```text")?;
        for record in &report.records {
            writeln!(self.writer, "{}", record.user_story)?;
            writeln!(
                self.writer,
                "  manual     {} {}",
                bar(record.roi.manual_testing_cost, max),
                money(record.roi.manual_testing_cost)
            )?;
            writeln!(
                self.writer,
                "  automation {} {}",
                bar(record.roi.automation_testing_cost, max),
                money(record.roi.automation_testing_cost)
            )?;
        }
        writeln!(self.writer, "```")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_failures(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.failures.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Failed Stories")?;
        writeln!(self.writer)?;
        for failure in &report.failures {
            let retry = if failure.transient { " (retry may help)" } else { "" };
            writeln!(
                self.writer,
                "- **{}**: {}{}",
                failure.user_story, failure.error, retry
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Bar scaled so `max` fills [`BAR_WIDTH`] cells; any non-zero value gets at least one.
fn bar(value: f64, max: f64) -> String {
    let cells = ((value / max) * BAR_WIDTH as f64).round() as usize;
    let cells = if value > 0.0 { cells.clamp(1, BAR_WIDTH) } else { 0 };
    format!("{}{}", "█".repeat(cells), "·".repeat(BAR_WIDTH - cells))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
