use crate::earley::Parse;
use crate::node::{Node, NodeValue};

/// Multi-line renderings for eyeballing parses.
pub trait Rendered {
    fn rendered(&self) -> String;
}

impl Rendered for Node {
    /// One line per node, indented by depth, with the node's span and action.
    fn rendered(&self) -> String {
        let mut accum = String::new();
        render_node(self, 0, &mut accum);
        accum
    }
}

fn render_node(node: &Node, depth: usize, accum: &mut String) {
    let (start, end) = node.span();
    accum.push_str(&"  ".repeat(depth));
    match &node.value {
        NodeValue::Terminal { token, .. } => {
            accum.push_str(&format!("{:?} [{}, {}]\n", token.text, start, end));
        }
        NodeValue::State(state) => {
            accum.push_str(&format!("{} [{}, {}]", state.name, start, end));
            if let Some(action) = node.action() {
                accum.push_str(&format!(" {{{}}}", action));
            }
            accum.push('\n');
        }
    }
    for child in &node.children {
        render_node(child, depth + 1, accum);
    }
}

impl Rendered for Parse<'_> {
    /// Every column with its token and the states it holds, in insertion order.
    fn rendered(&self) -> String {
        let mut accum = String::new();
        for column in self.columns() {
            match column.token() {
                Some(token) => accum.push_str(&format!("column {} {:?}\n", column.index(), token.text)),
                None => accum.push_str(&format!("column {}\n", column.index())),
            }
            for state in column.states() {
                accum.push_str(&format!("  {}\n", state));
            }
        }
        accum
    }
}
