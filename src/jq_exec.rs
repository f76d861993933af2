//! jq pre-filter (via jaq) applied to each input document before conversion.
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::FilterError;

/// Run `filter_src` over `input`; every filter output becomes one document.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>, FilterError> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut docs = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| FilterError::Runtime(format!("{e:?}")))?;
        // Val: Display -> JSON text
        docs.push(serde_json::from_str(&val.to_string())?);
    }
    Ok(docs)
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> FilterError {
    let msg = errs
        .iter()
        .map(|(file, err)| format!("jq parse error: {err:?} in `{}`", file.code))
        .collect::<Vec<_>>()
        .join("\n");
    FilterError::Compile(msg)
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> FilterError {
    let msg = errs
        .iter()
        .flat_map(|(file, list)| {
            list.iter()
                .map(move |(name, undef)| format!("jq undefined `{name}`: {undef:?} in `{}`", file.code))
        })
        .collect::<Vec<_>>()
        .join("\n");
    FilterError::Compile(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selects_subdocument() {
        let out = run_jaq(".data", &json!({"data": {"id": 1}})).unwrap();
        assert_eq!(out, vec![json!({"id": 1})]);
    }

    #[test]
    fn each_output_is_a_document() {
        let out = run_jaq(".items[]", &json!({"items": [1, "a"]})).unwrap();
        assert_eq!(out, vec![json!(1), json!("a")]);
    }

    #[test]
    fn bad_filter_is_compile_error() {
        let err = run_jaq(".[", &json!({})).unwrap_err();
        assert!(matches!(err, FilterError::Compile(_)));
        let err = run_jaq("no_such_fn", &json!({})).unwrap_err();
        assert!(matches!(err, FilterError::Compile(_)));
    }
}
