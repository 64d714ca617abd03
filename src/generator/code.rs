//! Statement-list representation of synthesized code.
//!
//! Synthesizers build [`Block`]s; rendering to text happens once, at the end,
//! through [`Block::render`].

const INDENT: &str = "    ";

/// One emitted statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let [mut] name [= value];`
    Let {
        name: String,
        mutable: bool,
        value: Option<String>,
    },
    /// `target = value;`
    Assign { target: String, value: String },
    /// `expr;`
    Expr(String),
    /// `if cond { .. } [else { .. }]`
    If {
        cond: String,
        then: Block,
        otherwise: Option<Block>,
    },
    /// `if let pattern = value { .. }`
    IfLet {
        pattern: String,
        value: String,
        then: Block,
    },
    /// `for pattern in iter { .. }`
    For {
        pattern: String,
        iter: String,
        body: Block,
    },
    /// `{ .. }`
    Scope(Block),
}

/// An ordered list of statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    stmts: Vec<Stmt>,
}

impl Block {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }

    pub fn extend(&mut self, other: Block) {
        self.stmts.extend(other.stmts);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    #[must_use]
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn assign(&mut self, target: impl Into<String>, value: impl Into<String>) {
        self.push(Stmt::Assign {
            target: target.into(),
            value: value.into(),
        });
    }

    pub fn let_mut(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push(Stmt::Let {
            name: name.into(),
            mutable: true,
            value: Some(value.into()),
        });
    }

    pub fn expr(&mut self, expr: impl Into<String>) {
        self.push(Stmt::Expr(expr.into()));
    }

    pub fn if_then(&mut self, cond: impl Into<String>, then: Block) {
        self.push(Stmt::If {
            cond: cond.into(),
            then,
            otherwise: None,
        });
    }

    pub fn if_let(&mut self, pattern: impl Into<String>, value: impl Into<String>, then: Block) {
        self.push(Stmt::IfLet {
            pattern: pattern.into(),
            value: value.into(),
            then,
        });
    }

    pub fn for_each(&mut self, pattern: impl Into<String>, iter: impl Into<String>, body: Block) {
        self.push(Stmt::For {
            pattern: pattern.into(),
            iter: iter.into(),
            body,
        });
    }

    /// Targets of every assignment in the block, nested ones included, in
    /// emission order.
    #[must_use]
    pub fn assignments(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_assignments(self, &mut out);
        out
    }

    /// Render the block with every line indented `depth` levels.
    #[must_use]
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        render_block(self, depth, &mut out);
        out
    }
}

fn collect_assignments<'a>(block: &'a Block, out: &mut Vec<&'a str>) {
    for stmt in &block.stmts {
        match stmt {
            Stmt::Assign { target, .. } => out.push(target),
            Stmt::If {
                then, otherwise, ..
            } => {
                collect_assignments(then, out);
                if let Some(otherwise) = otherwise {
                    collect_assignments(otherwise, out);
                }
            }
            Stmt::IfLet { then: body, .. } | Stmt::For { body, .. } | Stmt::Scope(body) => {
                collect_assignments(body, out);
            }
            Stmt::Let { .. } | Stmt::Expr(_) => {}
        }
    }
}

fn line(out: &mut String, pad: &str, text: &str) {
    out.push_str(pad);
    out.push_str(text);
    out.push('\n');
}

fn render_block(block: &Block, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    for stmt in &block.stmts {
        match stmt {
            Stmt::Let {
                name,
                mutable,
                value,
            } => {
                let kw = if *mutable { "let mut" } else { "let" };
                match value {
                    Some(v) => line(out, &pad, &format!("{kw} {name} = {v};")),
                    None => line(out, &pad, &format!("{kw} {name};")),
                }
            }
            Stmt::Assign { target, value } => line(out, &pad, &format!("{target} = {value};")),
            Stmt::Expr(expr) => line(out, &pad, &format!("{expr};")),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                line(out, &pad, &format!("if {cond} {{"));
                render_block(then, depth + 1, out);
                if let Some(otherwise) = otherwise {
                    line(out, &pad, "} else {");
                    render_block(otherwise, depth + 1, out);
                }
                line(out, &pad, "}");
            }
            Stmt::IfLet {
                pattern,
                value,
                then,
            } => {
                line(out, &pad, &format!("if let {pattern} = {value} {{"));
                render_block(then, depth + 1, out);
                line(out, &pad, "}");
            }
            Stmt::For {
                pattern,
                iter,
                body,
            } => {
                line(out, &pad, &format!("for {pattern} in {iter} {{"));
                render_block(body, depth + 1, out);
                line(out, &pad, "}");
            }
            Stmt::Scope(body) => {
                line(out, &pad, "{");
                render_block(body, depth + 1, out);
                line(out, &pad, "}");
            }
        }
    }
}

/// Source of unique temporary variable names within one synthesis call.
///
/// Each top-level call owns its own counter so repeated runs over the same
/// design produce identical output.
#[derive(Debug, Default)]
pub struct TempVars {
    count: usize,
}

impl TempVars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next name with the given prefix: `tmp1`, `tmp2`, ...
    pub fn next(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{prefix}{}", self.count)
    }
}
