// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show the field descriptors of a message type.

use clap::Args;
use serde::Serialize;

use crate::common::{Context, Result};
use robomsg::schema::{FieldDefault, FieldDescriptor};

/// Show the field descriptors of a message type.
#[derive(Args, Clone, Debug)]
pub struct SchemaCmd {
    /// Message type (e.g. sensors/Imu)
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    #[serde(rename = "type")]
    field_type: String,
    optional: bool,
    default: Option<String>,
    constraints: Vec<String>,
    description: Option<&'static str>,
}

impl FieldInfo {
    fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name(),
            field_type: field.field_type().name(),
            optional: field.is_optional(),
            default: field.field_default().map(describe_default),
            constraints: field.constraints().iter().map(ToString::to_string).collect(),
            description: field.description(),
        }
    }
}

fn describe_default(default: &FieldDefault) -> String {
    match default {
        FieldDefault::Literal(value) => value.to_string(),
        FieldDefault::Factory(factory) => factory().to_string(),
        FieldDefault::Shared(kind) => format!("shared {}", kind.as_str()),
    }
}

impl SchemaCmd {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let schema = ctx.schema(&self.type_name)?;
        let fields: Vec<_> = schema.fields().iter().map(FieldInfo::from_descriptor).collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&fields)?);
            return Ok(());
        }

        println!("{}", schema.name());
        for field in &fields {
            let mut line = format!("  {}: {}", field.name, field.field_type);
            if field.optional {
                line.push_str(" (optional)");
            }
            if let Some(default) = &field.default {
                line.push_str(&format!(" = {default}"));
            }
            for constraint in &field.constraints {
                line.push_str(&format!(" [{constraint}]"));
            }
            if let Some(description) = field.description {
                line.push_str(&format!("  # {description}"));
            }
            println!("{line}");
        }
        Ok(())
    }
}
