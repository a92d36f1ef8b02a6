//! Build, sign and serialize a small batch, then print it as hex.
//!
//! Transaction defaults are read as JSON from the file named by the first
//! argument, or fall back to a built-in intkey configuration. Logs go to
//! stderr (set `LOG_FORMAT=json` for JSON lines); the batch list goes to
//! stdout so it can be piped straight to a submitter.
//!
//! Run with:
//!   cargo run --example demo -- [defaults.json]

use ledger_sdk::crypto::{encode, Encoding};
use ledger_sdk::logging::{init_logging, LogFormat};
use ledger_sdk::transaction::verify_batch;
use ledger_sdk::{parse_batches, serialize_batches, Encoder, PrivateKey, TransactionParams};

const BUILTIN_DEFAULTS: &str = r#"{
    "family_name": "intkey",
    "family_version": "1.0",
    "payload_encoding": "text"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let format = std::env::var("LOG_FORMAT")
        .map(|s| LogFormat::from_str_lossy(&s))
        .unwrap_or_default();
    init_logging("ledger_sdk=debug", format)?;

    let defaults = match std::env::args().nth(1) {
        Some(path) => TransactionParams::from_json(&std::fs::read_to_string(path)?)?,
        None => TransactionParams::from_json(BUILTIN_DEFAULTS)?,
    };

    let key = PrivateKey::generate()?;
    let encoder = Encoder::new(key, defaults);
    tracing::info!(signer = %encoder.public_key(), "encoder ready");

    let transactions = (1..=3)
        .map(|i| {
            encoder.new_transaction(
                format!("inc x {}", i).into_bytes(),
                &TransactionParams {
                    nonce: i.to_string(),
                    ..Default::default()
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let batch = encoder.new_batch(transactions)?;
    verify_batch(&batch)?;

    let bytes = serialize_batches(&[batch]);
    let parsed = parse_batches(&bytes)?;
    tracing::info!(
        bytes = bytes.len(),
        transactions = parsed[0].transactions().len(),
        "batch list round-tripped"
    );

    println!("{}", encode(&bytes, Encoding::Hex));
    Ok(())
}
