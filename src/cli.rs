//! Minimal CLI: infer → (zod | schema)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ConvertOptions;
use crate::convert::{convert_value, schema_value, zod_module, ModuleEntry};
use crate::error::ConvertError;
use crate::inference::ArrayMode;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer the shape of a JSON document and print it as a Zod schema (or JSON Schema)
#[derive(Parser, Debug)]
#[command(name = "json-zod", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print a Zod schema expression
    Zod(ZodOut),
    /// infer and print a JSON Schema
    Schema(JsonSchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is converted separately
    #[arg(long)]
    jq_expr: Option<String>,

    /// JSON options file (header, binding, emit_type, array_mode, max_depth)
    #[arg(long)]
    config: Option<PathBuf>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InferenceSettings {
    /// type arrays from every element (union of shapes) instead of the first one
    #[arg(long, default_value_t = false)]
    union_arrays: bool,

    /// reject documents nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(clap::Parser, Debug)]
struct ZodOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    inference: InferenceSettings,

    /// print only the expression, without the import and `const` binding
    #[arg(long, default_value_t = false)]
    bare: bool,

    /// name of the `const` binding
    #[arg(long)]
    name: Option<String>,

    /// also export a `z.infer` type alias
    #[arg(long, default_value_t = false)]
    types: bool,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct JsonSchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    inference: InferenceSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

/// One JSON document ready for conversion, labelled with where it came from.
#[derive(Debug, Clone)]
struct Document {
    label: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn base_options(&self, cli_default: ConvertOptions) -> Result<ConvertOptions> {
        match self.config.as_ref() {
            Some(path) => Ok(ConvertOptions::load(path)?),
            None => Ok(cli_default),
        }
    }

    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for source in resolve_sources(&self.input)? {
            let (label, text) = read_source(&source)?;
            if text.trim().is_empty() {
                warn!("skipping empty input {label}");
                continue;
            }
            let value = serde_json::from_str::<Value>(&text)
                .map_err(ConvertError::from)
                .with_context(|| format!("failed to parse JSON from {label}"))?;
            let value = match self.json_pointer.as_deref() {
                None => value,
                Some(pointer) => match value.pointer(pointer) {
                    Some(x) => x.clone(),
                    None => bail!("JSON pointer {pointer} matched nothing in {label}"),
                },
            };
            match self.jq_expr.as_deref() {
                None => docs.push(Document { label, value }),
                Some(jq_expr) => {
                    let outputs = crate::jq_exec::run_jaq(jq_expr, &value)
                        .with_context(|| format!("failed to apply jq expression to {label}"))?;
                    debug!(source = %label, outputs = outputs.len(), "jq filter applied");
                    let many = outputs.len() > 1;
                    for (i, value) in outputs.into_iter().enumerate() {
                        let label = if many { format!("{label}#{i}") } else { label.clone() };
                        docs.push(Document { label, value });
                    }
                }
            }
        }
        Ok(docs)
    }
}

impl InferenceSettings {
    fn apply(&self, options: &mut ConvertOptions) {
        if self.union_arrays {
            options.array_mode = ArrayMode::Union;
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
    }
}

impl ZodOut {
    fn options(&self) -> Result<ConvertOptions> {
        let cli_default = ConvertOptions { header: true, ..ConvertOptions::default() };
        let mut options = self.input_settings.base_options(cli_default)?;
        self.inference.apply(&mut options);
        if self.bare {
            options.header = false;
        }
        if let Some(name) = self.name.as_ref() {
            options.binding = name.clone();
        }
        if self.types {
            options.emit_type = true;
        }
        options.validate()?;
        Ok(options)
    }
}

impl JsonSchemaOut {
    fn options(&self) -> Result<ConvertOptions> {
        let mut options = self.input_settings.base_options(ConvertOptions::default())?;
        self.inference.apply(&mut options);
        options.validate()?;
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Zod(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let options = target.options()?;
                // expressions only; the module header is assembled once below
                let bare = ConvertOptions { header: false, ..options.clone() };
                let docs = target.input_settings.load_documents()?;
                let blocks = docs
                    .par_iter()
                    .map(|doc| -> Result<(String, String)> {
                        let text = convert_value(&doc.value, &bare)
                            .with_context(|| format!("failed to convert {}", doc.label))?;
                        Ok((doc.label.clone(), text))
                    })
                    .collect::<Result<Vec<_>>>()?;
                write_output(target.out.as_deref(), &format_zod_output(&blocks, &options))
            }
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let options = target.options()?;
                let docs = target.input_settings.load_documents()?;
                let schemas = docs
                    .par_iter()
                    .map(|doc| {
                        schema_value(&doc.value, &options)
                            .with_context(|| format!("failed to convert {}", doc.label))
                    })
                    .collect::<Result<Vec<_>>>()?;
                write_output(target.out.as_deref(), &format_schemas(schemas))
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `blocks` are (source label, bare expression) pairs.
///
/// Without a header one document prints as-is and several are separated and
/// labelled with their source. With a header the import is written once and
/// several documents get numbered bindings (`schema1`, `schema2`, ...).
fn format_zod_output(blocks: &[(String, String)], options: &ConvertOptions) -> String {
    if !options.header {
        return match blocks {
            [(_, text)] => text.clone(),
            _ => blocks
                .iter()
                .map(|(label, text)| format!("// {label}\n{text}"))
                .collect::<Vec<_>>()
                .join("\n\n"),
        };
    }
    let entries = match blocks {
        [] => return String::new(),
        [(_, expression)] => vec![ModuleEntry {
            label: None,
            binding: options.binding.clone(),
            expression: expression.as_str(),
        }],
        _ => blocks
            .iter()
            .enumerate()
            .map(|(i, (label, expression))| ModuleEntry {
                label: Some(label.as_str()),
                binding: format!("{}{}", options.binding, i + 1),
                expression: expression.as_str(),
            })
            .collect(),
    };
    zod_module(&entries, options.emit_type)
}

fn format_schemas(mut schemas: Vec<Value>) -> String {
    if schemas.len() == 1 {
        format!("{:#}", schemas.remove(0))
    } else {
        format!("{:#}", Value::Array(schemas))
    }
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))?;
            debug!(path = %out.display(), bytes = text.len(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn read_source(source: &Source) -> Result<(String, String)> {
    match source {
        Source::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(("<stdin>".to_owned(), text))
        }
        Source::File(path) => {
            let label = path.to_string_lossy().to_string();
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read source file {label}"))?;
            Ok((label, text))
        }
    }
}

fn resolve_sources<I>(patterns: I) -> Result<Vec<Source>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<Source>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            out.push(Source::Stdin);
        } else if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
                matched_any = true;
                out.push(Source::File(entry?));
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(Source::File(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zod_args(args: &[&str]) -> ZodOut {
        let argv = ["json-zod", "zod"].iter().chain(args.iter());
        match CommandLineInterface::try_parse_from(argv).unwrap().cmd {
            Command::Zod(target) => target,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("json-zod-cli-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn zod_defaults_to_header() {
        let options = zod_args(&["-i", "x.json"]).options().unwrap();
        assert!(options.header);
        assert_eq!(options.binding, "schema");
        assert_eq!(options.array_mode, ArrayMode::FirstElement);
    }

    #[test]
    fn flags_override_options() {
        let options = zod_args(&[
            "-i",
            "x.json",
            "--bare",
            "--name",
            "user",
            "--types",
            "--union-arrays",
            "--max-depth",
            "7",
        ])
        .options()
        .unwrap();
        assert!(!options.header);
        assert!(options.emit_type);
        assert_eq!(options.binding, "user");
        assert_eq!(options.array_mode, ArrayMode::Union);
        assert_eq!(options.max_depth, 7);
    }

    #[test]
    fn invalid_binding_flag_is_rejected() {
        assert!(zod_args(&["-i", "x.json", "--name", "not-valid"]).options().is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(CommandLineInterface::try_parse_from(["json-zod", "zod"]).is_err());
    }

    #[test]
    fn dash_means_stdin_and_literals_pass_through() {
        let sources = resolve_sources(["-", "some/file.json"]).unwrap();
        assert_eq!(sources, vec![Source::Stdin, Source::File(PathBuf::from("some/file.json"))]);
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let dir = temp_dir("noglob");
        let pattern = format!("{}/*.nothing", dir.display());
        assert!(resolve_sources([pattern]).is_err());
    }

    #[test]
    fn documents_load_with_pointer_and_skip_blank_files() {
        let dir = temp_dir("docs");
        std::fs::write(dir.join("a.json"), r#"{"data": {"id": 1}}"#).unwrap();
        std::fs::write(dir.join("b.json"), "   \n").unwrap();
        let target = zod_args(&[
            "-i",
            dir.join("a.json").to_str().unwrap(),
            dir.join("b.json").to_str().unwrap(),
            "--json-pointer",
            "/data",
        ]);
        let docs = target.input_settings.load_documents().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].value, json!({"id": 1}));
    }

    #[test]
    fn malformed_file_names_its_source() {
        let dir = temp_dir("malformed");
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let target = zod_args(&["-i", path.to_str().unwrap()]);
        let err = target.input_settings.load_documents().unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("bad.json"), "{msg}");
        assert!(err.chain().any(|e| e.downcast_ref::<ConvertError>().is_some()));
    }

    #[test]
    fn zod_run_writes_output_file() {
        let dir = temp_dir("run");
        let input = dir.join("in.json");
        let out = dir.join("nested/out.ts");
        std::fs::write(&input, r#"{"a": [1]}"#).unwrap();
        let cli = CommandLineInterface::try_parse_from([
            "json-zod",
            "zod",
            "-i",
            input.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            "import { z } from \"zod\";\n\nconst schema = z.object({\n  a: z.array(z.number().int())\n})",
        );
    }

    #[test]
    fn zod_run_over_two_files_shares_one_import() {
        let dir = temp_dir("two");
        let a = dir.join("a.json");
        let b = dir.join("b.json");
        let out = dir.join("out.ts");
        std::fs::write(&a, r#"{"id": 1}"#).unwrap();
        std::fs::write(&b, r#"{"name": "x"}"#).unwrap();
        let cli = CommandLineInterface::try_parse_from([
            "json-zod",
            "zod",
            "-i",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--types",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written.matches("import { z } from \"zod\";").count(), 1);
        assert_eq!(written.matches("const schema1 = ").count(), 1);
        assert_eq!(written.matches("const schema2 = ").count(), 1);
        assert!(!written.contains("const schema = "));
        let expected = format!(
            "import {{ z }} from \"zod\";\n\n\
             // {}\nconst schema1 = z.object({{\n  id: z.number().int()\n}})\n\n\
             export type Schema1 = z.infer<typeof schema1>\n\n\
             // {}\nconst schema2 = z.object({{\n  name: z.string()\n}})\n\n\
             export type Schema2 = z.infer<typeof schema2>",
            a.display(),
            b.display(),
        );
        assert_eq!(written, expected);
    }

    #[test]
    fn schema_max_depth_flag_is_capped() {
        let args = ["json-zod", "schema", "-i", "x.json", "--max-depth", "99999"];
        let cli = CommandLineInterface::try_parse_from(args).unwrap();
        let Command::Schema(target) = cli.cmd else { panic!("expected schema command") };
        assert!(target.options().is_err());
    }

    #[test]
    fn several_blocks_are_labelled() {
        let blocks = vec![
            ("a.json".to_owned(), "z.string()".to_owned()),
            ("b.json".to_owned(), "z.null()".to_owned()),
        ];
        let bare = ConvertOptions::default();
        assert_eq!(format_zod_output(&blocks, &bare), "// a.json\nz.string()\n\n// b.json\nz.null()");
        assert_eq!(format_zod_output(&blocks[..1], &bare), "z.string()");
        let header = ConvertOptions { header: true, ..ConvertOptions::default() };
        assert_eq!(format_zod_output(&[], &header), "");
        assert_eq!(
            format_zod_output(&blocks[..1], &header),
            "import { z } from \"zod\";\n\nconst schema = z.string()",
        );
    }

    #[test]
    fn several_schemas_become_an_array() {
        let one = format_schemas(vec![json!({"type": "string"})]);
        assert_eq!(serde_json::from_str::<Value>(&one).unwrap(), json!({"type": "string"}));
        let two = format_schemas(vec![json!({"type": "string"}), json!({"type": "null"})]);
        assert_eq!(
            serde_json::from_str::<Value>(&two).unwrap(),
            json!([{"type": "string"}, {"type": "null"}]),
        );
    }
}
