use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use hkphone_core::{ACCEPTED_FORMATS, ALLOWED_PREFIXES, EMERGENCY_PREFIXES};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct FormatsArgs {}

#[derive(Debug, Serialize)]
struct FormatsDto {
    formats: Vec<&'static str>,
    emergency_prefixes: Vec<&'static str>,
    allowed_prefixes: Vec<&'static str>,
    output: &'static str,
}

pub fn formats(ctx: &Context<'_>, _args: FormatsArgs) -> Result<()> {
    let dto = FormatsDto {
        formats: ACCEPTED_FORMATS.to_vec(),
        emergency_prefixes: EMERGENCY_PREFIXES.to_vec(),
        allowed_prefixes: ALLOWED_PREFIXES.to_vec(),
        output: "XXXX-XXXX",
    };

    if ctx.json {
        return print_json(&dto);
    }

    println!("accepted formats:");
    for format in &dto.formats {
        println!("  {}", format);
    }
    println!("output format: {}", dto.output);
    println!("must not start with: {}", dto.emergency_prefixes.join(", "));
    println!("must start with: {}", dto.allowed_prefixes.join(", "));
    Ok(())
}
