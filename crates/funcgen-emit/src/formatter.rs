use funcgen_core::{
    AsmFunction, BinaryOp, Expr, FuncType, FunctionAttribute, FunctionDefinition, Param, UnaryOp,
};

/// Single-line FunC rendering of types, expressions and signatures.
pub struct FuncFormatter;

impl FuncFormatter {
    pub fn format_type(ty: &FuncType) -> String {
        match ty {
            FuncType::Int => "int".to_string(),
            FuncType::Cell => "cell".to_string(),
            FuncType::Slice => "slice".to_string(),
            FuncType::Builder => "builder".to_string(),
            FuncType::Cont => "cont".to_string(),
            FuncType::Tuple => "tuple".to_string(),
            FuncType::Tensor(items) => format!(
                "({})",
                items
                    .iter()
                    .map(Self::format_type)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            FuncType::Unit => "()".to_string(),
            FuncType::Hole => "_".to_string(),
        }
    }

    pub fn format_binary_op(op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }

    pub fn format_expr(expr: &Expr) -> String {
        match expr {
            Expr::Id(name) => name.clone(),
            Expr::Int(value) => value.to_string(),
            Expr::Bool(true) => "true".to_string(),
            Expr::Bool(false) => "false".to_string(),
            Expr::Str(value) => format!("\"{}\"", value),
            Expr::Nil => "null()".to_string(),
            Expr::Hole => "_".to_string(),
            Expr::Call { fun, args } => {
                let callee = match fun.as_ref() {
                    Expr::Id(name) => name.clone(),
                    other => format!("({})", Self::format_expr(other)),
                };
                format!("{}({})", callee, Self::format_args(args))
            }
            Expr::MethodCall {
                receiver,
                method,
                args,
                modifying,
            } => format!(
                "{}{}{}({})",
                Self::format_operand(receiver),
                if *modifying { "~" } else { "." },
                method,
                Self::format_args(args)
            ),
            Expr::Binary { op, lhs, rhs } => format!(
                "{} {} {}",
                Self::format_operand(lhs),
                Self::format_binary_op(*op),
                Self::format_operand(rhs)
            ),
            Expr::Unary { op, operand } => {
                let sign = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::BitNot => "~",
                };
                format!("{}{}", sign, Self::format_operand(operand))
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => format!(
                "{} ? {} : {}",
                Self::format_operand(cond),
                Self::format_operand(then),
                Self::format_operand(otherwise)
            ),
            Expr::Tensor(items) => format!("({})", Self::format_args(items)),
            Expr::Tuple(items) => format!("[{}]", Self::format_args(items)),
        }
    }

    fn format_operand(expr: &Expr) -> String {
        match expr {
            Expr::Binary { .. } | Expr::Ternary { .. } | Expr::Unary { .. } => {
                format!("({})", Self::format_expr(expr))
            }
            _ => Self::format_expr(expr),
        }
    }

    fn format_args(args: &[Expr]) -> String {
        args.iter()
            .map(Self::format_expr)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn format_params(params: &[Param]) -> String {
        params
            .iter()
            .map(|p| format!("{} {}", Self::format_type(&p.ty), p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn format_attr(attr: &FunctionAttribute) -> String {
        match attr {
            FunctionAttribute::Impure => "impure".to_string(),
            FunctionAttribute::Inline => "inline".to_string(),
            FunctionAttribute::InlineRef => "inline_ref".to_string(),
            FunctionAttribute::MethodId(None) => "method_id".to_string(),
            FunctionAttribute::MethodId(Some(id)) => format!("method_id({})", id),
        }
    }

    fn format_head(
        return_ty: &FuncType,
        name: &str,
        params: &[Param],
        attrs: &[FunctionAttribute],
    ) -> String {
        let mut head = format!(
            "{} {}({})",
            Self::format_type(return_ty),
            name,
            Self::format_params(params)
        );
        for attr in attrs {
            head.push(' ');
            head.push_str(&Self::format_attr(attr));
        }
        head
    }

    /// `int f(int x) impure inline`, without the body.
    pub fn format_signature(def: &FunctionDefinition) -> String {
        Self::format_head(&def.return_ty, &def.name, &def.params, &def.attrs)
    }

    pub fn format_asm_function(asm: &AsmFunction) -> String {
        format!(
            "{} asm \"{}\";",
            Self::format_head(&asm.return_ty, &asm.name, &asm.params, &asm.attrs),
            asm.asm
        )
    }
}
