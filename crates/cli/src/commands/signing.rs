use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use layer1_signer::{Method, RequestDescriptor};

use crate::config::{Config, GlobalArgs, load_rsa_signer, required_key_file};

#[derive(Debug, Args)]
pub struct SignArgs {
    /// HTTP method of the request
    #[arg(long, default_value = "GET")]
    pub method: String,
    /// Absolute URL, signed exactly as given
    #[arg(long)]
    pub url: String,
    /// Request body; omit for requests without one
    #[arg(long)]
    pub body: Option<String>,
    /// Unix timestamp to sign with instead of the current time
    #[arg(long)]
    pub created: Option<u64>,
}

pub(super) fn sign(global: &GlobalArgs, args: SignArgs, out: &mut dyn Write) -> Result<()> {
    let signer = Config::from_args(global)?.load_signer()?;

    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method {:?}", args.method))?;
    let body = args.body.as_deref().map(str::as_bytes);
    let request = RequestDescriptor::new(&method, &args.url, body);

    let headers = match args.created {
        Some(created) => signer.sign_at(&request, created)?,
        None => signer.sign(&request)?,
    };

    for (name, value) in headers.iter() {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}

pub(super) fn public_key(global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let signer = load_rsa_signer(required_key_file(global)?)?;
    out.write_all(signer.public_key_pem()?.as_bytes())?;
    Ok(())
}
