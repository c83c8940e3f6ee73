// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Validate command - check JSON documents against a message type.

use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;
use robomsg::encoding::JsonCodec;
use robomsg::schema::MessageSchema;
use robomsg::MessageError;

use crate::common::{read_document, Context, Result};

/// Validate JSON documents against a message type.
#[derive(Args, Clone, Debug)]
pub struct ValidateCmd {
    /// Message type (e.g. sensors/Imu)
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// JSON documents to validate
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Only print failures
    #[arg(short, long)]
    quiet: bool,
}

enum Outcome {
    Valid,
    Invalid(Vec<String>),
}

impl ValidateCmd {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let schema = ctx.schema(&self.type_name)?;
        let codec = JsonCodec::new();

        let outcomes: Vec<(PathBuf, Outcome)> = self
            .files
            .par_iter()
            .map(|path| {
                let outcome = check_file(ctx, &codec, &self.type_name, schema, path);
                (path.clone(), outcome)
            })
            .collect();

        let mut failed = 0;
        for (path, outcome) in &outcomes {
            match outcome {
                Outcome::Valid => {
                    if !self.quiet {
                        println!("OK    {}", path.display());
                    }
                }
                Outcome::Invalid(problems) => {
                    failed += 1;
                    println!("FAIL  {}", path.display());
                    for problem in problems {
                        println!("      {problem}");
                    }
                }
            }
        }

        tracing::info!(
            type_name = %self.type_name,
            files = outcomes.len(),
            failed,
            "validation finished"
        );

        if failed > 0 {
            anyhow::bail!("{failed} of {} document(s) failed validation", outcomes.len());
        }
        Ok(())
    }
}

fn check_file(
    ctx: &Context,
    codec: &JsonCodec,
    type_name: &str,
    schema: &MessageSchema,
    path: &Path,
) -> Outcome {
    let text = match read_document(path) {
        Ok(text) => text,
        Err(e) => return Outcome::Invalid(vec![format!("{e:#}")]),
    };
    let result = codec
        .decode_with_schema(&text, schema)
        .and_then(|raw| ctx.registry.build(type_name, &raw, &ctx.cache));

    match result {
        Ok(_) => Outcome::Valid,
        Err(MessageError::Validation(err)) => {
            tracing::debug!(path = %path.display(), violations = err.violations().len(), "invalid document");
            Outcome::Invalid(err.violations().iter().map(ToString::to_string).collect())
        }
        Err(e) => Outcome::Invalid(vec![e.to_string()]),
    }
}
