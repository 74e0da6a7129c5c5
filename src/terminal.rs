//! Plain-text surface printing views to a terminal

use std::io::Write;
use std::path::PathBuf;

use crate::view::{Callout, Chart, Surface};
use crate::viz::{draw_chart, slug, text_chart};

/// Writes views as text, optionally saving every chart as an SVG file
pub struct TerminalSurface<W: Write> {
    out: W,
    chart_dir: Option<PathBuf>,
    /// SVG files written so far
    pub saved_charts: Vec<PathBuf>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, chart_dir: Option<PathBuf>) -> Self {
        Self {
            out,
            chart_dir,
            saved_charts: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn title(&mut self, text: &str) -> crate::Result<()> {
        let rule = "#".repeat(text.chars().count() + 4);
        writeln!(self.out, "\n{}\n# {} #\n{}", rule, text, rule)?;
        Ok(())
    }

    fn header(&mut self, text: &str) -> crate::Result<()> {
        writeln!(self.out, "\n{}\n{}", text, "=".repeat(text.chars().count()))?;
        Ok(())
    }

    fn subheader(&mut self, text: &str) -> crate::Result<()> {
        writeln!(self.out, "\n{}\n{}", text, "-".repeat(text.chars().count()))?;
        Ok(())
    }

    fn markdown(&mut self, text: &str) -> crate::Result<()> {
        writeln!(self.out, "{}\n", text)?;
        Ok(())
    }

    fn metric(&mut self, label: &str, value: &str) -> crate::Result<()> {
        writeln!(self.out, "  {:<30} {}", label, value)?;
        Ok(())
    }

    fn callout(&mut self, kind: Callout, text: &str) -> crate::Result<()> {
        let tag = match kind {
            Callout::Info => "[info]",
            Callout::Success => "[ok]",
        };
        writeln!(self.out, "{} {}\n", tag, text)?;
        Ok(())
    }

    fn divider(&mut self) -> crate::Result<()> {
        writeln!(self.out, "{}", "-".repeat(60))?;
        Ok(())
    }

    fn chart(&mut self, chart: &Chart) -> crate::Result<()> {
        writeln!(self.out, "{}", text_chart(chart))?;

        if let Some(dir) = &self.chart_dir {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(format!("{}.svg", slug(chart.title())));
            draw_chart(chart, &path)?;
            writeln!(self.out, "  chart saved to: {}", path.display())?;
            self.saved_charts.push(path);
        }
        Ok(())
    }
}
