//! One emitted operation: both overloads with their doc comments, the
//! dispatch prologue, the accumulated `case` branches and the epilogue.

use dsgen_diagnostic::{GenError, GenResult};
use dsgen_ir::{KindFamily, OperationFlags, OperationRecord};

use crate::{Node, Printer};

const ORDINALS: [&str; 26] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
    "twenty-first",
    "twenty-second",
    "twenty-third",
    "twenty-fourth",
    "twenty-fifth",
    "twenty-sixth",
];

/// English ordinal for a zero-based parameter position.
pub fn ordinal(index: usize) -> Option<&'static str> {
    ORDINALS.get(index).copied()
}

/// An operation being assembled.
///
/// Opened from a record header, fed dispatch branches family by family, then
/// finished into method-level nodes.
pub struct OperationUnit {
    name: String,
    flags: OperationFlags,
    headline: String,
    doc_extra_lines: Vec<String>,
    parameters: Vec<String>,
    /// Binary operators only.
    operator: Option<String>,
    branches: Vec<Node>,
    families: Vec<KindFamily>,
}

impl OperationUnit {
    pub fn open(record: &OperationRecord) -> GenResult<Self> {
        let operator = if record.is_binary() {
            let Some(symbol) = record.operator_symbol() else {
                return Err(GenError::malformed_spec(format!(
                    "binary operator `{}` needs an operator symbol as the second word of its summary",
                    record.name
                ))
                .at_line(record.line));
            };
            Some(symbol.to_string())
        } else {
            None
        };
        Ok(OperationUnit {
            name: record.name.clone(),
            flags: record.flags(),
            headline: record.doc_headline(),
            doc_extra_lines: record.doc_extra_lines.clone(),
            parameters: record.parameter_names(),
            operator,
            branches: Vec::new(),
            families: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn is_binary(&self) -> bool {
        self.flags.contains(OperationFlags::BINARY)
    }

    fn allows_ints(&self) -> bool {
        self.flags.contains(OperationFlags::ALLOW_INTS)
    }

    /// Append the branches of one family and record its coverage.
    pub fn add_branches(&mut self, family: KindFamily, branches: Vec<Node>) {
        self.branches.extend(branches);
        self.families.push(family);
    }

    pub fn covers(&self, family: KindFamily) -> bool {
        self.families.contains(&family)
    }

    /// Covered type names in the order they were added.
    pub fn coverage(&self) -> Vec<&'static str> {
        self.families
            .iter()
            .map(|family| family.coverage_name())
            .collect()
    }

    /// Method-level nodes for both overloads.
    pub fn finish(mut self) -> Vec<Node> {
        let branches = std::mem::take(&mut self.branches);
        let mut nodes = self.doc_comment(false);
        nodes.push(Node::line(format!(
            "public static Dataset {}({}) {{",
            self.name,
            self.signature(false)
        )));
        nodes.push(Node::Nested(vec![Node::line(format!(
            "return {}({});",
            self.name,
            self.delegation()
        ))]));
        nodes.push(Node::line("}"));
        nodes.push(Node::Blank);

        nodes.extend(self.doc_comment(true));
        nodes.push(Node::line(format!(
            "public static Dataset {}({}) {{",
            self.name,
            self.signature(true)
        )));
        let mut body = self.prologue();
        body.push(Node::Blank);
        body.push(Node::line("switch(dt) {"));
        body.extend(self.dispatch_tail(branches));
        nodes.push(Node::Nested(body));
        nodes.push(Node::line("}"));
        nodes.push(Node::Blank);
        nodes
    }

    /// Render at class-member indentation.
    pub fn render(self) -> String {
        let mut printer = Printer::with_indent(1);
        printer.print_all(&self.finish());
        printer.take_output()
    }

    fn doc_comment(&self, with_output: bool) -> Vec<Node> {
        let mut doc = vec![Node::line("/**")];
        if self.is_binary() {
            doc.push(Node::line(format!(" * {} operator", self.name)));
            doc.push(Node::line(" * @param a first operand"));
            doc.push(Node::line(" * @param b second operand"));
        } else {
            doc.push(Node::line(format!(" * {} - {}", self.name, self.headline)));
            doc.push(Node::line(" * @param a single operand"));
        }
        if with_output {
            doc.push(Node::line(
                " * @param o output can be null - in which case, a new dataset is created",
            ));
        }
        for (index, parameter) in self.parameters.iter().enumerate() {
            let ordinal = ordinal(index).unwrap_or("next");
            doc.push(Node::line(format!(
                " * @param {parameter} {ordinal} parameter"
            )));
        }
        if self.is_binary() {
            doc.push(Node::line(format!(" * @return {}", self.headline)));
        } else {
            doc.push(Node::line(" * @return dataset"));
        }
        for extra in &self.doc_extra_lines {
            doc.push(Node::line(format!(" * {extra}")));
        }
        doc.push(Node::line(" */"));
        doc
    }

    fn signature(&self, with_output: bool) -> String {
        let mut arguments = vec!["final Object a".to_string()];
        if self.is_binary() {
            arguments.push("final Object b".to_string());
        }
        if with_output {
            arguments.push("final Dataset o".to_string());
        }
        arguments.extend(self.parameters.iter().map(|p| format!("final Object {p}")));
        arguments.join(", ")
    }

    fn delegation(&self) -> String {
        let mut arguments = vec!["a"];
        if self.is_binary() {
            arguments.push("b");
        }
        arguments.push("null");
        arguments.extend(self.parameters.iter().map(String::as_str));
        arguments.join(", ")
    }

    fn single_iterator(&self, output: &str) -> String {
        if self.allows_ints() {
            format!("new SingleInputBroadcastIterator(da, {output}, true, true, true)")
        } else {
            format!("new SingleInputBroadcastIterator(da, {output}, true)")
        }
    }

    fn prologue(&self) -> Vec<Node> {
        let mut body = vec![Node::line(
            "Dataset da = a instanceof Dataset ? (Dataset) a : DatasetFactory.createFromObject(a);",
        )];
        if self.is_binary() {
            body.push(Node::line(
                "Dataset db = b instanceof Dataset ? (Dataset) b : DatasetFactory.createFromObject(b);",
            ));
            body.push(Node::line(
                "BroadcastIterator it = BroadcastIterator.createIterator(da, db, o, true);",
            ));
            if self.allows_ints() {
                body.push(Node::line("it.setOutputDouble(false);"));
            }
        } else {
            body.push(Node::line(format!(
                "SingleInputBroadcastIterator it = {};",
                self.single_iterator("o")
            )));
        }
        if self.flags.contains(OperationFlags::UNSIGNED_MASK) {
            body.push(Node::line("final long unsignedMask;"));
        }
        body.push(Node::line("final Dataset result = it.getOutput();"));
        body.push(Node::block("if (!result.isComplex()) {", self.real_view()));
        body.push(Node::line("final int is = result.getElementsPerItem();"));
        body.push(Node::line("final int as = da.getElementsPerItem();"));
        if self.is_binary() {
            body.push(Node::line("final int bs = db.getElementsPerItem();"));
        }
        body.push(Node::line("final int dt = result.getDType();"));
        for parameter in &self.parameters {
            body.push(Node::line(format!(
                "final double {parameter}x = DTypeUtils.toReal({parameter});"
            )));
        }
        body
    }

    /// Complex inputs are read through their real view when the output is
    /// not complex.
    fn real_view(&self) -> Vec<Node> {
        if !self.is_binary() {
            return vec![Node::block(
                "if (da.isComplex()) {",
                vec![
                    Node::line("da = da.getRealView();"),
                    Node::line(format!("it = {};", self.single_iterator("result"))),
                ],
            )];
        }
        let mut recreate = vec![Node::line(
            "it = BroadcastIterator.createIterator(da, db, result, true);",
        )];
        if self.allows_ints() {
            recreate.push(Node::line("it.setOutputDouble(false);"));
        }
        vec![
            Node::line("boolean change = false;"),
            Node::block(
                "if (da.isComplex()) {",
                vec![
                    Node::line("da = da.getRealView();"),
                    Node::line("change = true;"),
                ],
            ),
            Node::block(
                "if (db.isComplex()) {",
                vec![
                    Node::line("db = db.getRealView();"),
                    Node::line("change = true;"),
                ],
            ),
            Node::block("if (change) {", recreate),
        ]
    }

    /// Branches, `default:`, the closing brace and the epilogue.
    fn dispatch_tail(&self, branches: Vec<Node>) -> Vec<Node> {
        let mut tail = branches;
        tail.push(Node::line("default:"));
        tail.push(Node::Nested(vec![Node::line(format!(
            "throw new IllegalArgumentException(\"{} supports {} datasets only\");",
            self.name,
            self.coverage().join(", ")
        ))]));
        tail.push(Node::line("}"));
        tail.push(Node::Blank);
        match &self.operator {
            Some(symbol) => tail.push(Node::line(format!(
                "addBinaryOperatorName(da, db, result, \"{symbol}\");"
            ))),
            None => tail.push(Node::line(format!(
                "addFunctionName(result, \"{}\");",
                self.name
            ))),
        }
        tail.push(Node::line("return result;"));
        tail
    }
}
