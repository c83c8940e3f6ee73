// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! List command - show registered message types.

use clap::Args;
use serde::Serialize;

use crate::common::{Context, Result};

/// List registered message types.
#[derive(Args, Clone, Debug)]
pub struct ListCmd {
    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct TypeSummary {
    name: &'static str,
    fields: usize,
    required: usize,
}

impl ListCmd {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let mut summaries = Vec::new();
        for name in ctx.registry.names()? {
            let schema = ctx.schema(name)?;
            summaries.push(TypeSummary {
                name,
                fields: schema.field_count(),
                required: schema.fields().iter().filter(|f| f.is_required()).count(),
            });
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for s in &summaries {
            println!(
                "{:<width$}  {} field(s), {} required",
                s.name, s.fields, s.required
            );
        }
        Ok(())
    }
}
