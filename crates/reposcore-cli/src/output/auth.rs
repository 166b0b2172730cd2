// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::style;

use crate::cli::OutputContext;
use crate::commands::types::AuthStatusResult;

use super::Renderable;

impl Renderable for AuthStatusResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        if self.authenticated {
            writeln!(w, "{} GitHub token available", style("*").green().bold())?;
            if let Some(ref method) = self.method {
                writeln!(w, "  Source: {}", style(method.to_string()).cyan())?;
            }
        } else {
            writeln!(
                w,
                "{} No GitHub token found. Searches run anonymously with a lower rate limit.",
                style("!").yellow().bold()
            )?;
            writeln!(
                w,
                "  Set {} or run {} to authenticate.",
                style("GH_TOKEN").cyan(),
                style("gh auth login").cyan()
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Authentication Status\n")?;
        if self.authenticated {
            writeln!(w, "**Status:** Authenticated")?;
            if let Some(ref method) = self.method {
                writeln!(w, "**Source:** {method}")?;
            }
        } else {
            writeln!(w, "**Status:** Anonymous")?;
        }
        Ok(())
    }
}
