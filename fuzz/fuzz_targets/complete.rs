#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlhint_core::{
    complete, get_completions, CompletionRequest, MetadataProvider, SchemaMetadata,
    SchemaSession, SchemaTable,
};

fuzz_target!(|data: &[u8]| {
    let Some((&cursor, rest)) = data.split_first() else {
        return;
    };
    if let Ok(sql) = std::str::from_utf8(rest) {
        let metadata = SchemaMetadata {
            default_schema: Some("public".to_string()),
            tables: vec![
                SchemaTable::new(None, "orders", &["id", "total"]),
                SchemaTable::new(Some("sales"), "leads", &["lead_id"]),
            ],
        };
        let provider = MetadataProvider::new(metadata);
        let cursor = usize::from(cursor).min(sql.len() + 1);

        let _ = get_completions(&provider, sql, cursor);

        let session = SchemaSession::new("fuzz", provider);
        let _ = complete(Some(&session), &CompletionRequest::new(sql, cursor));
    }
});
