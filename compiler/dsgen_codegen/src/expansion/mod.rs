//! Per-kind expansion of code blocks into dispatch branches.
//!
//! One `case Dataset.<TAG>:` branch is produced for every kind of the
//! requested family. Scalar kinds get a single element loop, compound kinds
//! a loop nest per broadcasting shape, complex kinds a loop per combination
//! of complex and real operands.

use dsgen_diagnostic::GenResult;
use dsgen_ir::{CodeBlock, KindDescriptor, KindFamily, KindTag, OperationFlags, Statement};
use tracing::debug;

use crate::transcoder::{transcode, Pass, TranscoderContext};
use crate::Node;

/// How operands are read inside a loop.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Lane {
    Double,
    Long,
}

impl Lane {
    fn primitive(self) -> &'static str {
        match self {
            Lane::Double => "double",
            Lane::Long => "long",
        }
    }

    /// Suffix of the iterator fields, `it.aDouble` / `it.aLong`.
    fn field(self) -> &'static str {
        match self {
            Lane::Double => "Double",
            Lane::Long => "Long",
        }
    }

    fn getter(self) -> &'static str {
        match self {
            Lane::Double => "getElementDoubleAbs",
            Lane::Long => "getElementLongAbs",
        }
    }
}

/// Expand `block` over every kind of `family`.
///
/// Integer families of an `integer_with_reals` block compute through
/// floating arithmetic. The complex family uses the block's real-only flag
/// and second-operand-real override.
pub fn expand_block(
    block: &CodeBlock,
    family: KindFamily,
    flags: OperationFlags,
) -> GenResult<Vec<Node>> {
    let mut branches = Vec::new();
    for kind in family.kinds() {
        let branch = BranchBuilder {
            kind,
            flags,
            override_long: block.tag == KindTag::IntegerWithReals,
            output: kind.output_var(),
            statements: &block.statements,
        };
        let body = if family == KindFamily::Complex {
            branch.complex_loop(
                block.complex_b_real_override.as_deref(),
                block.is_complex_real_only,
            )?
        } else if family.is_compound() {
            branch.compound_loop()?
        } else {
            branch.scalar_loop()?
        };
        debug!(tag = kind.tag, block = block.tag.as_str(), "expanded branch");
        branches.extend(branch.wrap(body));
    }
    Ok(branches)
}

struct BranchBuilder<'a> {
    kind: &'a KindDescriptor,
    flags: OperationFlags,
    override_long: bool,
    output: String,
    statements: &'a [Statement],
}

impl BranchBuilder<'_> {
    fn is_binary(&self) -> bool {
        self.flags.contains(OperationFlags::BINARY)
    }

    /// `case` label, output buffer, optional mask, loop nest, `break`.
    fn wrap(&self, loops: Node) -> [Node; 2] {
        let mut body = Vec::with_capacity(4);
        body.push(Node::line(format!(
            "final {}[] {} = (({}) result).getData();",
            self.kind.storage_element_type, self.output, self.kind.class_name
        )));
        if self.kind.is_integer() && self.flags.contains(OperationFlags::UNSIGNED_MASK) {
            body.push(Node::line(format!(
                "unsignedMask = {};",
                self.kind.unsigned_mask()
            )));
        }
        body.push(loops);
        body.push(Node::line("break;"));
        [
            Node::line(format!("case Dataset.{}:", self.kind.tag)),
            Node::Nested(body),
        ]
    }

    fn pass(&self, lane: Lane) -> Pass<'static> {
        let element = self.kind.storage_element_type;
        match lane {
            Lane::Double => Pass::floating(element, self.override_long),
            Lane::Long => Pass::long(element, self.kind.is_integer(), self.override_long),
        }
    }

    fn transcode(&self, lane: Lane, ctx: &mut TranscoderContext) -> GenResult<Vec<Node>> {
        transcode(self.statements, self.pass(lane), ctx)
    }

    fn fresh(&self) -> TranscoderContext {
        TranscoderContext::new(self.is_binary())
    }

    fn store(&self) -> Node {
        Node::line(format!("{}[it.oIndex] = ox;", self.output))
    }

    fn store_lane(&self) -> Node {
        Node::line(format!("{}[it.oIndex + j] = ox;", self.output))
    }

    /// Reads of the current operand element(s), `final` unless reassigned.
    fn reads(&self, lane: Lane, final_a: bool, final_b: bool) -> Vec<Node> {
        let prim = lane.primitive();
        let field = lane.field();
        let qualifier = |is_final: bool| if is_final { "final " } else { "" };
        if self.is_binary() {
            vec![
                Node::line(format!("{}{prim} iax = it.a{field};", qualifier(final_a))),
                Node::line(format!("{}{prim} ibx = it.b{field};", qualifier(final_b))),
            ]
        } else {
            vec![Node::line(format!("{}{prim} ix = it.a{field};", qualifier(final_a)))]
        }
    }

    /// Double loop under `isOutputDouble()` and long loop otherwise, or the
    /// long loop alone when integer output is allowed.
    fn dual(&self, body: impl Fn(Lane) -> GenResult<Vec<Node>>) -> GenResult<Node> {
        if self.flags.contains(OperationFlags::ALLOW_INTS) {
            return Ok(Node::block("{", body(Lane::Long)?));
        }
        Ok(Node::chain(vec![
            ("if (it.isOutputDouble()) {".to_string(), body(Lane::Double)?),
            ("} else {".to_string(), body(Lane::Long)?),
        ]))
    }

    fn while_loop(body: Vec<Node>) -> Node {
        Node::block("while (it.hasNext()) {", body)
    }

    fn scalar_loop(&self) -> GenResult<Node> {
        self.dual(|lane| {
            let mut body = self.reads(lane, true, true);
            body.extend(self.transcode(lane, &mut self.fresh())?);
            body.push(self.store());
            Ok(vec![Self::while_loop(body)])
        })
    }

    fn compound_loop(&self) -> GenResult<Node> {
        let mut arms = vec![arm("if (is == 1) {", self.scalar_loop()?)];
        if self.is_binary() {
            arms.push(arm(
                "} else if (as < bs) {",
                self.dual(|lane| self.broadcast_one(lane, "b"))?,
            ));
            arms.push(arm(
                "} else if (as > bs) {",
                self.dual(|lane| self.broadcast_one(lane, "a"))?,
            ));
            arms.push(arm(
                "} else if (as == 1) {",
                self.dual(|lane| self.single_element(lane))?,
            ));
            arms.push(arm("} else {", self.dual(|lane| self.elementwise(lane))?));
        } else {
            arms.push(arm(
                "} else if (as == 1) {",
                self.dual(|lane| self.single_element(lane))?,
            ));
            arms.push(arm(
                "} else {",
                self.dual(|lane| self.unary_elementwise(lane))?,
            ));
        }
        Ok(Node::chain(arms))
    }

    /// Operand `operand` has more elements per item than the other: its
    /// lanes are walked while the other operand's single value is reused.
    fn broadcast_one(&self, lane: Lane, operand: &str) -> GenResult<Vec<Node>> {
        let (final_a, final_b, dataset) = if operand == "a" {
            (false, true, "da")
        } else {
            (true, false, "db")
        };
        let mut ctx = self.fresh();
        let mut body = self.reads(lane, final_a, final_b);
        body.extend(self.transcode(lane, &mut ctx)?);
        body.push(self.store());

        let mut inner = vec![Node::line(format!(
            "i{operand}x = {dataset}.{}(it.{operand}Index + j);",
            lane.getter()
        ))];
        inner.extend(self.transcode(lane, &mut ctx)?);
        inner.push(self.store_lane());
        body.push(Node::block("for (int j = 1; j < is; j++) {", inner));
        Ok(vec![Self::while_loop(body)])
    }

    /// Single-element input: one value fills the whole output item.
    fn single_element(&self, lane: Lane) -> GenResult<Vec<Node>> {
        let mut body = self.reads(lane, true, true);
        body.extend(self.transcode(lane, &mut self.fresh())?);
        body.push(Node::block(
            "for (int j = 0; j < is; j++) {",
            vec![self.store_lane()],
        ));
        Ok(vec![Self::while_loop(body)])
    }

    fn elementwise(&self, lane: Lane) -> GenResult<Vec<Node>> {
        let mut ctx = self.fresh();
        let mut body = self.reads(lane, false, false);
        body.extend(self.transcode(lane, &mut ctx)?);
        body.push(self.store());

        let mut inner = vec![
            Node::line(format!("iax = da.{}(it.aIndex + j);", lane.getter())),
            Node::line(format!("ibx = db.{}(it.bIndex + j);", lane.getter())),
        ];
        inner.extend(self.transcode(lane, &mut ctx)?);
        inner.push(self.store_lane());
        body.push(Node::block("for (int j = 1; j < is; j++) {", inner));
        Ok(vec![Self::while_loop(body)])
    }

    fn unary_elementwise(&self, lane: Lane) -> GenResult<Vec<Node>> {
        let mut inner = vec![Node::line(format!(
            "final {} ix = da.{}(it.aIndex + j);",
            lane.primitive(),
            lane.getter()
        ))];
        inner.extend(self.transcode(lane, &mut self.fresh())?);
        inner.push(self.store_lane());
        Ok(vec![Self::while_loop(vec![Node::block(
            "for (int j = 0; j < is; j++) {",
            inner,
        )])])
    }

    /// One `while` over the iterator with the given reads, writing `ox`
    /// and, unless real-only, `oy`.
    fn complex_while(
        &self,
        reads: Vec<Node>,
        statements: &[Statement],
        pass: Pass<'_>,
        real_only: bool,
    ) -> GenResult<Node> {
        let mut body = reads;
        body.extend(transcode(statements, pass, &mut self.fresh())?);
        body.push(self.store());
        if !real_only {
            body.push(Node::line(format!("{}[it.oIndex + 1] = oy;", self.output)));
        }
        Ok(Self::while_loop(body))
    }

    fn complex_loop(
        &self,
        b_real_override: Option<&[Statement]>,
        real_only: bool,
    ) -> GenResult<Node> {
        let element = self.kind.storage_element_type;
        let floating = Pass::floating(element, false);
        let long = Pass::long(element, true, false);
        let statements = self.statements;
        let b_real = b_real_override
            .filter(|overrides| !overrides.is_empty())
            .unwrap_or(statements);
        let reads = |lane: Lane, extra: &[&str]| {
            let mut reads = self.reads(lane, true, true);
            reads.extend(extra.iter().map(|line| Node::line(*line)));
            reads
        };

        if !self.is_binary() {
            let real_input = self.output_lanes(
                vec![
                    Node::line("final double iy = 0;"),
                    self.complex_while(reads(Lane::Double, &[]), statements, floating, real_only)?,
                ],
                || {
                    Ok(vec![
                        Node::line("final long iy = 0;"),
                        self.complex_while(reads(Lane::Long, &[]), statements, long, real_only)?,
                    ])
                },
            )?;
            let complex_input = self.complex_while(
                reads(Lane::Double, &[IY_FROM_A]),
                statements,
                floating,
                real_only,
            )?;
            return Ok(Node::chain(vec![
                ("if (!da.isComplex()) {".to_string(), real_input),
                arm("} else {", complex_input),
            ]));
        }

        let b_complex = self.complex_while(
            reads(Lane::Double, &[IBY_FROM_B]),
            statements,
            floating,
            real_only,
        )?;
        let b_real_double = self.complex_while(
            reads(Lane::Double, &["final double iby = 0;"]),
            b_real,
            floating,
            real_only,
        )?;
        let a_real = self.output_lanes(
            vec![
                Node::line("final double iay = 0;"),
                Node::chain(vec![
                    arm("if (db.isComplex()) {", b_complex),
                    arm("} else {", b_real_double),
                ]),
            ],
            || {
                Ok(vec![
                    Node::line("final long iay = 0;"),
                    self.complex_while(
                        reads(Lane::Long, &["final long iby = 0;"]),
                        b_real,
                        long,
                        real_only,
                    )?,
                ])
            },
        )?;
        let a_complex_b_real = self.complex_while(
            reads(Lane::Double, &[IAY_FROM_A]),
            b_real,
            floating,
            real_only,
        )?;
        let both_complex = self.complex_while(
            reads(Lane::Double, &[IAY_FROM_A, IBY_FROM_B]),
            statements,
            floating,
            real_only,
        )?;

        Ok(Node::chain(vec![
            ("if (!da.isComplex()) {".to_string(), a_real),
            (
                "} else if (!db.isComplex()) {".to_string(),
                vec![Node::line("final double iby = 0;"), a_complex_b_real],
            ),
            arm("} else {", both_complex),
        ]))
    }

    /// Real operands are read as `long` as well when integer output is
    /// allowed; otherwise only the floating loop is emitted.
    fn output_lanes(
        &self,
        double: Vec<Node>,
        long: impl FnOnce() -> GenResult<Vec<Node>>,
    ) -> GenResult<Vec<Node>> {
        if !self.flags.contains(OperationFlags::ALLOW_INTS) {
            return Ok(double);
        }
        Ok(vec![Node::chain(vec![
            ("if (it.isOutputDouble()) {".to_string(), double),
            ("} else {".to_string(), long()?),
        ])])
    }
}

const IY_FROM_A: &str = "final double iy = da.getElementDoubleAbs(it.aIndex + 1);";
const IAY_FROM_A: &str = "final double iay = da.getElementDoubleAbs(it.aIndex + 1);";
const IBY_FROM_B: &str = "final double iby = db.getElementDoubleAbs(it.bIndex + 1);";

/// An `if`/`else` arm whose body is a single node.
fn arm(head: &str, node: Node) -> (String, Vec<Node>) {
    (head.to_string(), vec![node])
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
