//! Testing utilities for the stackgraph workspace
//!
//! Shared fixtures and lookups over synthesized stacks.

#![allow(missing_docs)]

use serde_json::Value as JsonValue;
use stackgraph_aws::{synthesize, SynthesizedStack};
use stackgraph_config::RawInput;
use stackgraph_core::{Declaration, Reference, SynthesizedGraph, Value};

pub fn raw(pairs: &[(&str, &str)]) -> RawInput {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

pub fn synth_with(pairs: &[(&str, &str)]) -> SynthesizedStack {
    synthesize(&raw(pairs)).unwrap()
}

pub fn synth_default() -> SynthesizedStack {
    synth_with(&[])
}

pub fn remote_backend() -> Vec<(&'static str, &'static str)> {
    vec![
        ("TF_BACKEND", "remote"),
        ("TF_STATE_BUCKET", "tv-devops-tf-state"),
        ("TF_LOCK_TABLE", "tv-devops-tf-locks"),
    ]
}

pub fn declaration<'a>(graph: &'a SynthesizedGraph, name: &str) -> &'a Declaration {
    graph
        .get(name)
        .unwrap_or_else(|| panic!("`{name}` is not declared"))
}

pub fn property<'a>(graph: &'a SynthesizedGraph, name: &str, key: &str) -> &'a Value {
    declaration(graph, name)
        .property(key)
        .unwrap_or_else(|| panic!("`{name}` has no `{key}`"))
}

pub fn str_property<'a>(graph: &'a SynthesizedGraph, name: &str, key: &str) -> &'a str {
    property(graph, name, key)
        .as_str()
        .unwrap_or_else(|| panic!("`{name}.{key}` is not a string"))
}

pub fn reference_property<'a>(graph: &'a SynthesizedGraph, name: &str, key: &str) -> &'a Reference {
    property(graph, name, key)
        .as_reference()
        .unwrap_or_else(|| panic!("`{name}.{key}` is not a reference"))
}

pub fn names_of_kind<'a>(graph: &'a SynthesizedGraph, kind: &'a str) -> Vec<&'a str> {
    graph.of_kind(kind).map(Declaration::name).collect()
}

/// Every `${...}` expression in a rendered document, skipping `$${` escapes
pub fn interpolations(document: &JsonValue) -> Vec<String> {
    let mut found = Vec::new();
    collect_sequences(document, '$', &mut found);
    found
}

/// Every `%{...}` directive in a rendered document, skipping `%%{` escapes
pub fn directives(document: &JsonValue) -> Vec<String> {
    let mut found = Vec::new();
    collect_sequences(document, '%', &mut found);
    found
}

fn collect_sequences(value: &JsonValue, sigil: char, found: &mut Vec<String>) {
    match value {
        JsonValue::String(s) => scan(s, sigil, found),
        JsonValue::Array(items) => items.iter().for_each(|v| collect_sequences(v, sigil, found)),
        JsonValue::Object(map) => map.values().for_each(|v| collect_sequences(v, sigil, found)),
        _ => {}
    }
}

fn scan(text: &str, sigil: char, found: &mut Vec<String>) {
    let open = format!("{sigil}{{");
    let escaped = format!("{sigil}{sigil}{{");
    let mut rest = text;
    while let Some(start) = rest.find(&open) {
        if rest[..start + open.len()].ends_with(&escaped) {
            rest = &rest[start + open.len()..];
            continue;
        }
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        found.push(rest[start + open.len()..start + len].to_owned());
        rest = &rest[start + len + 1..];
    }
}
