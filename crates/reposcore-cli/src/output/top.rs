// SPDX-License-Identifier: Apache-2.0

//! Rendering for the ranked repository list.

use std::io::{self, Write};

use console::style;
use reposcore_core::utils::format_relative_time;

use crate::cli::OutputContext;
use crate::commands::types::TopResult;

use super::Renderable;

const EMPTY_MESSAGE: &str = "No repositories found matching the criteria.";

const SEPARATOR_WIDTH: usize = 50;

impl Renderable for TopResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        if self.repositories.is_empty() {
            writeln!(w, "{EMPTY_MESSAGE}")?;
            return Ok(());
        }

        writeln!(
            w,
            "{} top {} repositories created after {}:",
            style("Found").bold(),
            style(&self.language).cyan(),
            self.created_after
        )?;
        writeln!(w)?;

        for scored in &self.repositories {
            let repo = &scored.repo;
            writeln!(w, "Repository: {}", style(&repo.full_name).bold())?;
            writeln!(w, "Stars: {}", repo.stargazers_count)?;
            writeln!(w, "Forks: {}", repo.forks_count)?;
            writeln!(
                w,
                "Updated: {} {}",
                repo.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                style(format!("({})", format_relative_time(&repo.updated_at))).dim()
            )?;
            writeln!(w, "Score: {}", style(format!("{:.2}", scored.score)).green())?;
            writeln!(w, "{}", style("-".repeat(SEPARATOR_WIDTH)).dim())?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "## Top {} repositories created after {}\n",
            self.language, self.created_after
        )?;
        if self.repositories.is_empty() {
            writeln!(w, "{EMPTY_MESSAGE}")?;
            return Ok(());
        }

        writeln!(w, "| # | Repository | Stars | Forks | Updated | Score |")?;
        writeln!(w, "|---|------------|------:|------:|---------|------:|")?;
        for (rank, scored) in self.repositories.iter().enumerate() {
            let repo = &scored.repo;
            writeln!(
                w,
                "| {} | [{}](https://github.com/{}) | {} | {} | {} | {:.2} |",
                rank + 1,
                repo.full_name,
                repo.full_name,
                repo.stargazers_count,
                repo.forks_count,
                repo.updated_at.format("%Y-%m-%d"),
                scored.score
            )?;
        }
        Ok(())
    }
}
