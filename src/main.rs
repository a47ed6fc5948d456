use ambience::{Ambience, AssemblyParser, CSharpAmbience, ConversionFlags, ProjectContent, TypeDefinition};
use anyhow::{Context, Result};
use clap::{Arg, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only declarations
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("ambience")
        .about("Print C# declaration headers for a semantic-model snapshot")
        .arg(
            Arg::new("input")
                .help("Model snapshot JSON file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("flags")
                .long("flags")
                .help("Display options: a preset (standard, all, none) or facet names joined by '|' or ','")
                .default_value("standard"),
        )
        .arg(
            Arg::new("entity")
                .long("entity")
                .help("Only print entities with this name or qualified name"),
        )
        .get_matches();

    let input_file = matches
        .get_one::<String>("input")
        .context("no input file given")?;
    let flags: ConversionFlags = matches
        .get_one::<String>("flags")
        .map(String::as_str)
        .unwrap_or("standard")
        .parse()?;
    let filter = matches.get_one::<String>("entity").map(String::as_str);

    let content = AssemblyParser::from_path(input_file)
        .with_context(|| format!("failed to load model from {}", input_file))?;

    let ambience = CSharpAmbience::new(flags);
    let output = render_project(&ambience, &content, filter)?;

    print!("{}", output);

    Ok(())
}

fn render_project(ambience: &CSharpAmbience, content: &ProjectContent, filter: Option<&str>) -> Result<String> {
    let mut output = String::new();
    for definition in content.top_level_types() {
        render_type(ambience, content, definition, filter, 0, &mut output)?;
    }
    Ok(output)
}

fn render_type(
    ambience: &CSharpAmbience,
    content: &ProjectContent,
    definition: &TypeDefinition,
    filter: Option<&str>,
    depth: usize,
    output: &mut String,
) -> Result<()> {
    let qualified = content.reflection_name(definition).replace('+', ".");
    // A filtered listing is flat
    let indent = |depth: usize| if filter.is_some() { String::new() } else { "  ".repeat(depth) };

    if is_selected(filter, &definition.name, &qualified) {
        let line = ambience
            .convert_entity(definition.id.into(), content)
            .with_context(|| format!("failed to convert {}", qualified))?;
        output.push_str(&format!("{}{}\n", indent(depth), line));
    }

    for member in &definition.members {
        let member_qualified = format!("{}.{}", qualified, member.name);
        if !is_selected(filter, &member.name, &member_qualified) {
            continue;
        }
        let line = ambience
            .convert_entity(member.id.into(), content)
            .with_context(|| format!("failed to convert {}", member_qualified))?;
        output.push_str(&format!("{}{}\n", indent(depth + 1), line));
    }

    for nested in &definition.nested_types {
        if let Some(nested_definition) = content.type_definition(*nested) {
            render_type(ambience, content, nested_definition, filter, depth + 1, output)?;
        }
    }

    Ok(())
}

fn is_selected(filter: Option<&str>, name: &str, qualified: &str) -> bool {
    match filter {
        Some(wanted) => wanted == name || wanted == qualified,
        None => true,
    }
}
