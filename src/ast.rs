use std::{fmt, mem, rc::Rc};

use crate::util::stack::ensure_sufficient_stack;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code. The lexer attaches one to number and string tokens, and the parser
/// stores one in every `Expr::Literal` node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `nil`
    Nil,
    /// `true` or `false`.
    Bool(bool),
    /// A double-precision number literal such as `3` or `2.5`.
    Number(f64),
    /// A string literal without its surrounding quotes.
    String(String),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every child is owned through a `Box`, so each expression is a strict tree.
/// Variants that can fail at runtime record the source line of the token that
/// is blamed in the error.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// A parenthesized expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
    },
    /// A unary operation (`-x`, `!x`).
    Unary {
        /// The operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line of the operator token.
        line: usize,
    },
    /// An arithmetic, comparison or equality operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line of the operator token.
        line:  usize,
    },
    /// A short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when the left does not decide.
        right: Box<Self>,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Assignment to an existing variable.
    Assign {
        /// Name of the assigned variable.
        name:  String,
        /// The new value.
        value: Box<Self>,
        /// Line of the variable name.
        line:  usize,
    },
    /// A call such as `f(1, 2)`.
    Call {
        /// The expression producing the callee.
        callee:    Box<Self>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Line of the closing parenthesis.
        line:      usize,
    },
}

/// A function declaration: name, parameter names and body.
///
/// Declarations are reference counted so that a function value can keep its
/// body alive after the statement list it was parsed from is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Name of the function.
    pub name:   String,
    /// Parameter names, in declaration order.
    pub params: Vec<String>,
    /// Statements of the body.
    pub body:   Vec<Stmt>,
    /// Line of the function name.
    pub line:   usize,
}

/// An AST node representing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression.
        expr: Expr,
    },
    /// `print expr;`
    Print {
        /// The printed expression.
        expr: Expr,
        /// Line of the `print` keyword.
        line: usize,
    },
    /// `var name = initializer;`
    Var {
        /// Name of the declared variable.
        name:        String,
        /// Optional initializer; the variable is `nil` without one.
        initializer: Option<Expr>,
        /// Line of the variable name.
        line:        usize,
    },
    /// `{ ... }`
    Block {
        /// Statements executed in a fresh scope.
        statements: Vec<Self>,
    },
    /// `if (condition) then_branch else else_branch`
    If {
        /// The condition.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed when the condition is falsy.
        else_branch: Option<Box<Self>>,
    },
    /// `while (condition) body`
    While {
        /// Re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
    },
    /// `fun name(params) { body }`
    Function(Rc<FunctionDecl>),
    /// `return value;`
    Return {
        /// The returned expression; `nil` when absent.
        value: Option<Expr>,
        /// Line of the `return` keyword.
        line:  usize,
    },
}

/// Trees are torn down with an explicit work list, so dropping a deeply
/// nested expression does not recurse once per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl Expr {
    /// Moves every child expression into `pending`, leaving childless
    /// placeholders behind.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Grouping { expr } | Self::Unary { expr, .. } | Self::Assign { value: expr, .. } => {
                pending.push(mem::replace(&mut **expr, Self::placeholder()));
            },
            Self::Binary { left, right, .. } | Self::Logical { left, right, .. } => {
                pending.push(mem::replace(&mut **left, Self::placeholder()));
                pending.push(mem::replace(&mut **right, Self::placeholder()));
            },
            Self::Call { callee, arguments, .. } => {
                pending.push(mem::replace(&mut **callee, Self::placeholder()));
                pending.append(arguments);
            },
            Self::Literal { .. } | Self::Variable { .. } => {},
        }
    }

    const fn placeholder() -> Self {
        Self::Literal { value: LiteralValue::Nil,
                        line:  0, }
    }
}

impl Drop for Stmt {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut stmt) = pending.pop() {
            stmt.detach_children(&mut pending);
        }
    }
}

impl Stmt {
    /// Moves every nested statement into `pending`.
    ///
    /// A function body is only detached when no function value shares the
    /// declaration any more.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Block { statements } => pending.append(statements),
            Self::If { then_branch,
                       else_branch,
                       .. } => {
                pending.push(mem::replace(&mut **then_branch, Self::placeholder()));
                if let Some(else_branch) = else_branch {
                    pending.push(mem::replace(&mut **else_branch, Self::placeholder()));
                }
            },
            Self::While { body, .. } => pending.push(mem::replace(&mut **body, Self::placeholder())),
            Self::Function(declaration) => {
                if let Some(declaration) = Rc::get_mut(declaration) {
                    pending.append(&mut declaration.body);
                }
            },
            Self::Expression { .. } | Self::Print { .. } | Self::Var { .. } | Self::Return { .. } => {},
        }
    }

    const fn placeholder() -> Self {
        Self::Block { statements: Vec::new() }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `!`
    Not,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

/// Short-circuiting logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Negate => "-",
            Self::Not => "!",
        };
        f.write_str(symbol)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        };
        f.write_str(symbol)
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Renders the tree in a parenthesized prefix form, e.g. `(* (- 1) (group 2))`.
///
/// # Example
/// ```
/// use lox::ast::{BinaryOperator, Expr};
///
/// let expr = Expr::Binary { left:  Box::new(Expr::Literal { value: 1.0.into(),
///                                                           line:  1, }),
///                           op:    BinaryOperator::Add,
///                           right: Box::new(Expr::Variable { name: "x".into(),
///                                                            line: 1, }),
///                           line:  1, };
///
/// assert_eq!(expr.to_string(), "(+ 1 x)");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Grouping { expr } => write!(f, "(group {expr})"),
            Self::Unary { op, expr, .. } => write!(f, "({op} {expr})"),
            Self::Binary { left, op, right, .. } => write!(f, "({op} {left} {right})"),
            Self::Logical { left, op, right } => write!(f, "({op} {left} {right})"),
            Self::Variable { name, .. } => f.write_str(name),
            Self::Assign { name, value, .. } => write!(f, "(= {name} {value})"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "(call {callee}")?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                f.write_str(")")
            },
        })
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Self::Expression { expr } => write!(f, "(; {expr})"),
            Self::Print { expr, .. } => write!(f, "(print {expr})"),
            Self::Var { name,
                        initializer: Some(initializer),
                        .. } => write!(f, "(var {name} {initializer})"),
            Self::Var { name, .. } => write!(f, "(var {name})"),
            Self::Block { statements } => {
                f.write_str("(block")?;
                for statement in statements {
                    write!(f, " {statement}")?;
                }
                f.write_str(")")
            },
            Self::If { condition,
                       then_branch,
                       else_branch, } => {
                write!(f, "(if {condition} {then_branch}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " {else_branch}")?;
                }
                f.write_str(")")
            },
            Self::While { condition, body } => write!(f, "(while {condition} {body})"),
            Self::Function(decl) => {
                write!(f, "(fun {} ({})", decl.name, decl.params.join(" "))?;
                for statement in &decl.body {
                    write!(f, " {statement}")?;
                }
                f.write_str(")")
            },
            Self::Return { value: Some(value),
                           .. } => write!(f, "(return {value})"),
            Self::Return { .. } => f.write_str("(return)"),
        })
    }
}
