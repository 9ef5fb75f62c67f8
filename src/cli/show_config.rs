//! Config command - list configuration entries

use anstream::println;
use coursectl::context::Context;
use serde_json::Value;

/// Print every configuration entry as `'key': 'value'`
pub fn run_config(ctx: &Context) {
    for (key, value) in ctx.config.entries() {
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("'{key}': '{rendered}'");
    }
}
