//! FunC-style IR produced by the lowering passes.
//!
//! Only the shape needed to register, scan and render functions lives here; the IR is
//! already finalized by the time it reaches the registry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuncType {
    Int,
    Cell,
    Slice,
    Builder,
    Cont,
    Tuple,
    Tensor(Vec<FuncType>),
    Unit,
    #[default]
    Hole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionAttribute {
    Impure,
    Inline,
    InlineRef,
    MethodId(Option<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub ty: FuncType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: FuncType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Neg,
    BitNot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Id(String),
    Int(i64),
    Bool(bool),
    Str(String),
    Nil,
    Hole,
    /// Direct call; the callee is usually a bare [`Expr::Id`].
    Call {
        fun: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// Receiver-qualified call, `recv.method(args)` or `recv~method(args)` when `modifying`.
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        modifying: bool,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Tensor(Vec<Expr>),
    Tuple(Vec<Expr>),
}

impl Expr {
    pub fn id(name: impl Into<String>) -> Self {
        Expr::Id(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            fun: Box::new(Expr::id(name)),
            args,
        }
    }

    pub fn method(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
            modifying: false,
        }
    }

    pub fn modifying(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
            modifying: true,
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn ternary(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Block(Vec<Stmt>),
    Let {
        #[serde(default)]
        ty: FuncType,
        target: Expr,
        #[serde(default)]
        value: Option<Expr>,
    },
    Assign {
        target: Expr,
        #[serde(default)]
        op: Option<BinaryOp>,
        value: Expr,
    },
    Expr(Expr),
    Return(Expr),
    If {
        cond: Expr,
        #[serde(default)]
        negated: bool,
        then: Vec<Stmt>,
        #[serde(default)]
        otherwise: Option<Vec<Stmt>>,
    },
    Repeat {
        count: Expr,
        body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    DoUntil {
        body: Vec<Stmt>,
        cond: Expr,
    },
    TryCatch {
        body: Vec<Stmt>,
        #[serde(default)]
        catch_vars: Vec<String>,
        handler: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Return(expr)
    }

    pub fn let_(ty: FuncType, name: impl Into<String>, value: Expr) -> Self {
        Stmt::Let {
            ty,
            target: Expr::id(name),
            value: Some(value),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            target,
            op: None,
            value,
        }
    }

    pub fn if_(cond: Expr, then: Vec<Stmt>, otherwise: Option<Vec<Stmt>>) -> Self {
        Stmt::If {
            cond,
            negated: false,
            then,
            otherwise,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    #[serde(default)]
    pub attrs: Vec<FunctionAttribute>,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub return_ty: FuncType,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl FunctionDefinition {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        return_ty: FuncType,
        body: Vec<Stmt>,
    ) -> Self {
        Self {
            attrs: Vec::new(),
            name: name.into(),
            params,
            return_ty,
            body,
        }
    }

    pub fn with_attrs(mut self, attrs: Vec<FunctionAttribute>) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Function whose body is raw target instructions (`asm "..."`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmFunction {
    #[serde(default)]
    pub attrs: Vec<FunctionAttribute>,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub return_ty: FuncType,
    pub asm: String,
}

impl AsmFunction {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        return_ty: FuncType,
        asm: impl Into<String>,
    ) -> Self {
        Self {
            attrs: Vec::new(),
            name: name.into(),
            params,
            return_ty,
            asm: asm.into(),
        }
    }

    pub fn with_attrs(mut self, attrs: Vec<FunctionAttribute>) -> Self {
        self.attrs = attrs;
        self
    }
}
