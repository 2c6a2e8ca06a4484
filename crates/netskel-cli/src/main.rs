//! CLI entrypoint.

use std::error::Error;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use netskel_core::{AttributeLayout, AttributeLayouts, MethodBodyPolicy, Netskel, Renderer};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
/// What stands in for method and accessor bodies.
enum BodyArg {
	/// No body: `void M();`.
	Omit,
	/// Empty braces (default).
	Empty,
	/// `=> throw new NotImplementedException();`.
	Throw,
	/// `=> throw null;`.
	ThrowNull,
}

impl From<BodyArg> for MethodBodyPolicy {
	fn from(body: BodyArg) -> Self {
		match body {
			BodyArg::Omit => Self::Omit,
			BodyArg::Empty => Self::EmptyBraces,
			BodyArg::Throw => Self::ThrowStub,
			BodyArg::ThrowNull => Self::ThrowNull,
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
/// How several attributes on one symbol are bracketed.
enum LayoutArg {
	/// One bracket section per attribute.
	Discrete,
	/// One bracket section listing every attribute.
	List,
}

impl From<LayoutArg> for AttributeLayout {
	fn from(layout: LayoutArg) -> Self {
		match layout {
			LayoutArg::Discrete => Self::Discrete,
			LayoutArg::List => Self::List,
		}
	}
}

#[derive(Parser)]
#[command(name = "netskel", author, version, about, long_about = None)]
/// Parsed command-line options for the netskel CLI.
struct Cli {
	/// Metadata dump (JSON) to render, or `-` for stdin
	#[arg(default_value = "-")]
	input: String,

	/// Render only the named type (`Namespace.Name`, nested types joined with `+`)
	#[arg(short = 't', long = "type", value_name = "FULL_NAME")]
	type_name: Option<String>,

	/// Write the listing to a file instead of stdout
	#[arg(short = 'o', long, value_name = "PATH")]
	output: Option<PathBuf>,

	/// Output the decoded metadata as pretty JSON instead of rendering it
	#[arg(short = 'r', long, default_value_t = false, conflicts_with = "type_name")]
	raw: bool,

	/// Fail when any symbol could not be rendered
	#[arg(long, default_value_t = false)]
	strict: bool,

	/// Enable verbose mode, logging each rendering step to stderr
	#[arg(short = 'v', long, default_value_t = false)]
	verbose: bool,

	/// Prefix type names with their namespace instead of emitting `using` directives
	#[arg(short = 'n', long, default_value_t = false)]
	with_namespace: bool,

	/// Render nested type names without their declaring types
	#[arg(long, default_value_t = false)]
	no_declaring_type_name: bool,

	/// Render built-in types by runtime name (`Int32`) instead of keyword (`int`)
	#[arg(long, default_value_t = false)]
	no_primitive_aliases: bool,

	/// Write `default` instead of `default(T)`
	#[arg(long, default_value_t = false)]
	default_literal: bool,

	/// Body stand-in for methods and accessors
	#[arg(short = 'b', long, value_enum, default_value = "empty")]
	body: BodyArg,

	/// Leave off the `;` that ends bodiless declarations
	#[arg(long, default_value_t = false)]
	omit_terminator: bool,

	/// Keep `: int` on enums backed by the default underlying type
	#[arg(long, default_value_t = false)]
	enum_underlying_type: bool,

	/// Do not render `?` on nullable reference types
	#[arg(long, default_value_t = false)]
	no_nullability: bool,

	/// Keep non-public member names in `MemberNotNull` arguments
	#[arg(long, default_value_t = false)]
	inaccessible_null_state_members: bool,

	/// Render private and internal symbols
	#[arg(short = 'p', long, default_value_t = false)]
	private: bool,

	/// Render records as plain classes and structs
	#[arg(long, default_value_t = false)]
	no_record_syntax: bool,

	/// Keep the `IEquatable<R>` interface every record implements
	#[arg(long, default_value_t = false)]
	record_equality_interface: bool,

	/// Render arguments bound to defaulted attribute parameters as `name: value`
	#[arg(long, default_value_t = false)]
	named_optional_arguments: bool,

	/// Attribute bracketing for every attribute group
	#[arg(long, value_enum, default_value = "discrete")]
	attribute_layout: LayoutArg,

	/// Attribute bracketing on property and event accessors
	#[arg(long, value_enum)]
	accessor_attribute_layout: Option<LayoutArg>,

	/// Attribute bracketing for `field:`-targeted attributes
	#[arg(long, value_enum)]
	backing_field_attribute_layout: Option<LayoutArg>,

	/// Attribute bracketing on generic parameters
	#[arg(long, value_enum)]
	generic_parameter_attribute_layout: Option<LayoutArg>,

	/// Attribute bracketing for `return:`-targeted attributes
	#[arg(long, value_enum)]
	return_attribute_layout: Option<LayoutArg>,

	/// One indentation level
	#[arg(long, default_value = "  ", conflicts_with = "tabs")]
	indent: String,

	/// Indent with tabs
	#[arg(long, default_value_t = false)]
	tabs: bool,
}

/// Install a stderr subscriber honouring `RUST_LOG`; `-v` forces debug output.
fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}

/// Build the rendering configuration from the CLI flags.
fn build_renderer(cli: &Cli) -> Renderer {
	let layout = AttributeLayout::from(cli.attribute_layout);
	let pick = |choice: Option<LayoutArg>| choice.map(AttributeLayout::from).unwrap_or(layout);
	let layouts = AttributeLayouts {
		member: layout,
		accessor: pick(cli.accessor_attribute_layout),
		backing_field: pick(cli.backing_field_attribute_layout),
		generic_parameter: pick(cli.generic_parameter_attribute_layout),
		return_value: pick(cli.return_attribute_layout),
	};
	let indent = if cli.tabs { "\t" } else { cli.indent.as_str() };

	Renderer::default()
		.with_namespace(cli.with_namespace)
		.with_declaring_type_name(!cli.no_declaring_type_name)
		.with_primitive_aliases(!cli.no_primitive_aliases)
		.with_default_literal(cli.default_literal)
		.with_attribute_layouts(layouts)
		.with_method_body(cli.body.into())
		.with_omitted_terminator(cli.omit_terminator)
		.with_omitted_enum_underlying_type(!cli.enum_underlying_type)
		.with_nullability(!cli.no_nullability)
		.with_omitted_inaccessible_null_state_members(!cli.inaccessible_null_state_members)
		.with_ignore_private_and_assembly(!cli.private)
		.with_record_syntax(!cli.no_record_syntax)
		.with_omitted_record_equality_interface(!cli.record_equality_interface)
		.with_named_optional_arguments(cli.named_optional_arguments)
		.with_indent(indent)
}

/// Load the dump, render it and write the result.
fn run_cmdline(cli: &Cli) -> Result<(), Box<dyn Error>> {
	let netskel = Netskel::new()
		.with_renderer(build_renderer(cli))
		.with_strict(cli.strict);

	let assembly = if cli.input == "-" {
		netskel.load_str(&io::read_to_string(io::stdin())?)?
	} else {
		netskel.load_path(&cli.input)?
	};

	let output = if cli.raw {
		let mut json = netskel.raw_json(&assembly)?;
		json.push('\n');
		json
	} else if let Some(full_name) = cli.type_name.as_deref() {
		let mut text = netskel.render_type(&assembly, full_name)?;
		text.push('\n');
		text
	} else {
		netskel.render_assembly(&assembly)?.text
	};

	match &cli.output {
		Some(path) => fs::write(path, output)
			.map_err(|e| format!("failed to write {}: {e}", path.display()))?,
		None => print!("{output}"),
	}

	Ok(())
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(e) = run_cmdline(&cli) {
		eprintln!("{} {e}", "error:".red().bold());
		process::exit(1);
	}
}
