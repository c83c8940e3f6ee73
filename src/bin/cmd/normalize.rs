// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Normalize command - print a document in canonical form.
//!
//! The output lists every declared field in declaration order with defaults
//! filled in and absent optional fields as `null`.

use std::path::PathBuf;

use clap::Args;
use robomsg::encoding::JsonCodec;

use crate::common::{read_document, Context, Result};

/// Validate a JSON document and print its canonical form.
#[derive(Args, Clone, Debug)]
pub struct NormalizeCmd {
    /// Message type (e.g. sensors/Imu)
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// JSON document
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print compact JSON on one line
    #[arg(long)]
    compact: bool,
}

impl NormalizeCmd {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let schema = ctx.schema(&self.type_name)?;
        let codec = JsonCodec::new();

        let text = read_document(&self.file)?;
        let raw = codec.decode_with_schema(&text, schema)?;
        let message = ctx.registry.build(&self.type_name, &raw, &ctx.cache)?;

        println!("{}", codec.encode_dyn(message.as_ref(), !self.compact)?);
        Ok(())
    }
}
