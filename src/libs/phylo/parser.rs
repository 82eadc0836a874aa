use super::error::TreeError;
use super::node::NodeId;
use super::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::{char, multispace0},
    combinator::{cut, map, opt},
    multi::{many0, separated_list1},
    number::complete::double,
    sequence::{delimited, preceded},
    IResult, Parser,
};

/// Recursive intermediate form; flattened into the `Tree` arena once parsing succeeds.
#[derive(Debug, Default)]
struct ParsedNode {
    name: Option<String>,
    length: Option<f64>,
    children: Vec<ParsedNode>,
}

impl ParsedNode {
    fn into_tree(self, tree: &mut Tree) -> Result<NodeId, TreeError> {
        let id = tree.add_node();
        for child in self.children {
            let child_id = child.into_tree(tree)?;
            tree.add_child(id, child_id)?;
        }
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.name;
            node.length = self.length;
        }
        Ok(id)
    }
}

// Ignore whitespace around `inner`
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// Unquoted labels stop at Newick structural characters.
// Quoted labels escape their quote by doubling it: 'O''Brien'
fn label(input: &str) -> IResult<&str, String> {
    let unquoted = map(take_while(|c: char| !"():;,[]".contains(c)), |s: &str| {
        s.trim().to_string()
    });

    alt((single_quoted, double_quoted, unquoted)).parse(input)
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '\'')
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '"')
}

fn quoted(input: &str, quote: char) -> IResult<&str, String> {
    let (mut rest, _) = char::<&str, nom::error::Error<&str>>(quote).parse(input)?;
    let mut label = String::new();

    loop {
        let Some(pos) = rest.find(quote) else {
            return Err(nom::Err::Error(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::Char,
            )));
        };
        label.push_str(&rest[..pos]);
        let after = &rest[pos + quote.len_utf8()..];
        match after.strip_prefix(quote) {
            Some(escaped) => {
                label.push(quote);
                rest = escaped;
            }
            None => return Ok((after, label)),
        }
    }
}

// ":0.123", scientific notation allowed
fn length(input: &str) -> IResult<&str, f64> {
    preceded(ws(char(':')), cut(ws(double))).parse(input)
}

// "[...]", content ignored
fn comment(input: &str) -> IResult<&str, ()> {
    map(
        delimited(ws(char('[')), opt(is_not("]")), ws(char(']'))),
        |_| (),
    )
    .parse(input)
}

// (child1,child2,...)Label:Length
fn subtree(input: &str) -> IResult<&str, ParsedNode> {
    let (input, children) = opt(delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), subtree),
        cut(ws(char(')'))),
    ))
    .parse(input)?;
    let (input, name) = opt(label).parse(input)?;
    let (input, _) = many0(comment).parse(input)?;
    let (input, length) = opt(length).parse(input)?;
    let (input, _) = many0(comment).parse(input)?;

    let node = ParsedNode {
        name: name.filter(|s| !s.is_empty()),
        length,
        children: children.unwrap_or_default(),
    };
    Ok((input, node))
}

/// Parse a single Newick tree terminated by `;`.
///
/// ```
/// use ragr::libs::phylo::parser::parse_newick;
///
/// let tree = parse_newick("(A:1,(B:2,C:3e-1));").unwrap();
/// assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
///
/// let err = parse_newick("(A,B;").unwrap_err();
/// assert!(err.to_string().contains("line 1"));
/// ```
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    let mut parser = (ws(subtree), ws(char(';')));

    match parser.parse(input) {
        Ok((rest, (root_node, _))) => {
            if !rest.trim().is_empty() {
                return Err(make_tree_error(
                    input,
                    rest,
                    "unexpected content after ';'",
                ));
            }
            let mut tree = Tree::new();
            let root_id = root_node.into_tree(&mut tree)?;
            tree.set_root(root_id);
            Ok(tree)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(
            input,
            e.input,
            &format!("invalid Newick ({:?})", e.code),
        )),
        Err(nom::Err::Incomplete(_)) => Err(TreeError::ParseError {
            message: "Incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: "".to_string(),
        }),
    }
}

// Locate `rest` inside `input` to report line and column
fn make_tree_error(input: &str, rest: &str, message: &str) -> TreeError {
    let offset = input.len() - rest.len();
    let consumed = &input[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => offset - pos,
        None => offset + 1,
    };
    let snippet: String = rest.chars().take(20).collect();

    TreeError::ParseError {
        message: message.to_string(),
        line,
        column,
        snippet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let tree = parse_newick("((A,B),C);").unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_whitespace_and_comments() {
        let tree = parse_newick(" ( A : 0.5 [&&NHX:S=human] ,\n B[x]:1.5 ) root ;\n").unwrap();
        assert_eq!(tree.leaf_names(), vec!["A", "B"]);
        let b = tree.get_node_by_name("B").unwrap();
        assert_eq!(tree.get_node(b).unwrap().length, Some(1.5));
        let a = tree.get_node_by_name("A").unwrap();
        assert_eq!(tree.get_node(a).unwrap().length, Some(0.5));
    }

    #[test]
    fn test_parse_quoted() {
        let tree = parse_newick("('Homo sapiens',\"Pan \"\"chimp\"\"\",'O''Brien');").unwrap();
        assert_eq!(
            tree.leaf_names(),
            vec!["Homo sapiens", "Pan \"chimp\"", "O'Brien"]
        );
    }

    #[test]
    fn test_parse_errors() {
        // missing semicolon
        assert!(parse_newick("(A,B)").is_err());

        // bad length
        match parse_newick("(A:x,B);") {
            Err(TreeError::ParseError { line, column, .. }) => {
                assert_eq!(line, 1);
                assert!(column > 1);
            }
            other => panic!("unexpected {:?}", other),
        }

        // trailing garbage
        let err = parse_newick("(A,B);\n(C,D);").unwrap_err();
        match err {
            TreeError::ParseError { line, snippet, .. } => {
                assert_eq!(line, 2);
                assert!(snippet.starts_with("(C,D)"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
