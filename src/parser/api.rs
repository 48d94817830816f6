use pest_consume::{match_nodes, Error, Parser};

type ParseResult<T> = std::result::Result<T, Error<Rule>>;
type Node<'i> = pest_consume::Node<'i, Rule, ()>;

#[derive(Parser)]
#[grammar = "parser/qualified_name.pest"] // relative to src
pub struct QualifiedNameParser;

#[pest_consume::parser]
impl QualifiedNameParser {
    #[allow(non_snake_case)]
    fn EOI(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn identifier(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }

    fn qualified_name(input: Node) -> ParseResult<Vec<String>> {
        Ok(match_nodes!(input.into_children();
            [identifier(segments).., EOI(_)] => segments.collect(),
        ))
    }

    fn single_identifier(input: Node) -> ParseResult<String> {
        Ok(match_nodes!(input.into_children();
            [identifier(name), EOI(_)] => name,
        ))
    }
}

/// Splits a dotted path like `ns.foo.Baz` into its segments.
///
/// Every segment must be an identifier; empty segments (`ns..Baz`, a trailing
/// dot) are rejected with the position of the offending character.
pub fn parse_qualified_name(path: &str) -> Result<Vec<String>, String> {
    let nodes =
        QualifiedNameParser::parse(Rule::qualified_name, path).map_err(|e| e.to_string())?;
    let node = nodes.single().map_err(|e| e.to_string())?;
    QualifiedNameParser::qualified_name(node).map_err(|e| e.to_string())
}

/// Checks that `name` is usable as a single symbol name.
pub fn parse_identifier(name: &str) -> Result<String, String> {
    let nodes =
        QualifiedNameParser::parse(Rule::single_identifier, name).map_err(|e| e.to_string())?;
    let node = nodes.single().map_err(|e| e.to_string())?;
    QualifiedNameParser::single_identifier(node).map_err(|e| e.to_string())
}
