use crate::{
    config::EmitterConfig,
    emitter::{EmitContext, EmitHelper, EmitResult, Emitter},
    formatter::FuncFormatter,
    output::{self, OutputFormat},
};
use anyhow::Result;
use funcgen_core::{
    BodyKind, FuncType, FunctionBody, FunctionDefinition, Placement, RegisteredFunction, Stmt,
};
use indexmap::IndexMap;
use std::io::Write;

/// Renders a single registered function.
#[derive(Debug, Clone, Default)]
pub struct FunctionEmitter {
    pub annotate_placeholders: bool,
}

impl Emitter for FunctionEmitter {
    type Item = RegisteredFunction;

    fn emit<W: Write>(
        &self,
        item: &RegisteredFunction,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        match &item.body {
            FunctionBody::Ordinary(def) => self.emit_definition(def, writer, context),
            FunctionBody::Asm(asm) => {
                EmitHelper::write_line(writer, context, &FuncFormatter::format_asm_function(asm))
            }
            FunctionBody::Placeholder if self.annotate_placeholders => EmitHelper::write_comment(
                writer,
                context,
                &format!("placeholder: {}", item.name),
            ),
            FunctionBody::Placeholder => Ok(()),
        }
    }
}

impl FunctionEmitter {
    fn emit_definition<W: Write>(
        &self,
        def: &FunctionDefinition,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_block(
            writer,
            context,
            &FuncFormatter::format_signature(def),
            "",
            |w, c| self.emit_stmts(&def.body, w, c),
        )
    }

    fn emit_stmts<W: Write>(
        &self,
        stmts: &[Stmt],
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        for stmt in stmts {
            self.emit_stmt(stmt, writer, context)?;
        }
        Ok(())
    }

    fn emit_stmt<W: Write>(
        &self,
        stmt: &Stmt,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        match stmt {
            Stmt::Block(stmts) => {
                EmitHelper::write_line(writer, context, "{")?;
                context.indent();
                self.emit_stmts(stmts, writer, context)?;
                context.dedent();
                EmitHelper::write_line(writer, context, "}")
            }
            Stmt::Let { ty, target, value } => {
                let ty = match ty {
                    FuncType::Hole => "var".to_string(),
                    other => FuncFormatter::format_type(other),
                };
                let target = FuncFormatter::format_expr(target);
                let line = match value {
                    Some(value) => {
                        format!("{} {} = {};", ty, target, FuncFormatter::format_expr(value))
                    }
                    None => format!("{} {};", ty, target),
                };
                EmitHelper::write_line(writer, context, &line)
            }
            Stmt::Assign { target, op, value } => {
                let op = op
                    .map(|op| format!("{}=", FuncFormatter::format_binary_op(op)))
                    .unwrap_or_else(|| "=".to_string());
                EmitHelper::write_line(
                    writer,
                    context,
                    &format!(
                        "{} {} {};",
                        FuncFormatter::format_expr(target),
                        op,
                        FuncFormatter::format_expr(value)
                    ),
                )
            }
            Stmt::Expr(expr) => EmitHelper::write_line(
                writer,
                context,
                &format!("{};", FuncFormatter::format_expr(expr)),
            ),
            Stmt::Return(expr) => EmitHelper::write_line(
                writer,
                context,
                &format!("return {};", FuncFormatter::format_expr(expr)),
            ),
            Stmt::If {
                cond,
                negated,
                then,
                otherwise,
            } => {
                let keyword = if *negated { "ifnot" } else { "if" };
                EmitHelper::write_line(
                    writer,
                    context,
                    &format!("{} ({}) {{", keyword, FuncFormatter::format_expr(cond)),
                )?;
                context.indent();
                self.emit_stmts(then, writer, context)?;
                context.dedent();
                if let Some(otherwise) = otherwise {
                    EmitHelper::write_line(writer, context, "} else {")?;
                    context.indent();
                    self.emit_stmts(otherwise, writer, context)?;
                    context.dedent();
                }
                EmitHelper::write_line(writer, context, "}")
            }
            Stmt::Repeat { count, body } => EmitHelper::write_block(
                writer,
                context,
                &format!("repeat ({})", FuncFormatter::format_expr(count)),
                "",
                |w, c| self.emit_stmts(body, w, c),
            ),
            Stmt::While { cond, body } => EmitHelper::write_block(
                writer,
                context,
                &format!("while ({})", FuncFormatter::format_expr(cond)),
                "",
                |w, c| self.emit_stmts(body, w, c),
            ),
            Stmt::DoUntil { body, cond } => EmitHelper::write_block(
                writer,
                context,
                "do",
                &format!(" until ({});", FuncFormatter::format_expr(cond)),
                |w, c| self.emit_stmts(body, w, c),
            ),
            Stmt::TryCatch {
                body,
                catch_vars,
                handler,
            } => {
                EmitHelper::write_line(writer, context, "try {")?;
                context.indent();
                self.emit_stmts(body, writer, context)?;
                context.dedent();
                EmitHelper::write_line(
                    writer,
                    context,
                    &format!("}} catch ({}) {{", catch_vars.join(", ")),
                )?;
                context.indent();
                self.emit_stmts(handler, writer, context)?;
                context.dedent();
                EmitHelper::write_line(writer, context, "}")
            }
        }
    }
}

/// Functions sharing one placement, in emission order.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub placement: Option<Placement>,
    pub functions: Vec<&'a RegisteredFunction>,
}

impl<'a> Section<'a> {
    pub fn title(&self) -> String {
        self.placement
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unplaced".to_string())
    }

    fn rank(&self) -> u8 {
        match self.placement {
            Some(Placement::Stdlib) => 0,
            Some(Placement::Constants) => 1,
            Some(Placement::Type(_)) => 2,
            None => 3,
        }
    }
}

/// Writes blank lines between top-level items, never before the first.
#[derive(Default)]
struct Spacer {
    started: bool,
}

impl Spacer {
    fn gap<W: Write>(&mut self, writer: &mut W) -> EmitResult {
        if self.started {
            writeln!(writer)?;
        }
        self.started = true;
        Ok(())
    }
}

/// Renders the output of [`FunctionRegistry::extract`](funcgen_core::FunctionRegistry::extract).
pub struct FuncEmitter<'a> {
    functions: Vec<&'a RegisteredFunction>,
    config: EmitterConfig,
}

impl<'a> FuncEmitter<'a> {
    pub fn new(functions: Vec<&'a RegisteredFunction>) -> Self {
        Self {
            functions,
            config: EmitterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Groups by placement: stdlib, constants, type sections in order of first use, then
    /// unplaced functions. Order within a section follows the emission order.
    pub fn sections(&self) -> Vec<Section<'a>> {
        let mut grouped: IndexMap<Option<Placement>, Vec<&'a RegisteredFunction>> = IndexMap::new();
        for function in &self.functions {
            grouped
                .entry(function.placement.clone())
                .or_default()
                .push(*function);
        }

        let mut sections: Vec<Section<'a>> = grouped
            .into_iter()
            .map(|(placement, functions)| Section {
                placement,
                functions,
            })
            .collect();
        sections.sort_by_key(Section::rank);
        sections
    }

    pub fn emit<W: Write>(&self, writer: &mut W) -> EmitResult {
        let mut context = EmitContext::from_config(&self.config);
        let function_emitter = FunctionEmitter {
            annotate_placeholders: self.config.annotate_placeholders,
        };
        let mut spacer = Spacer::default();

        if self.config.group_by_placement {
            // Asm definitions are their own declarations and are hoisted whole.
            let declarations: Vec<String> = self
                .functions
                .iter()
                .filter_map(|f| match &f.body {
                    FunctionBody::Ordinary(def) => {
                        Some(format!("{};", FuncFormatter::format_signature(def)))
                    }
                    FunctionBody::Asm(asm) => Some(FuncFormatter::format_asm_function(asm)),
                    FunctionBody::Placeholder => None,
                })
                .collect();
            if !declarations.is_empty() {
                spacer.gap(writer)?;
                EmitHelper::write_header(writer, &context, "declarations")?;
                for declaration in declarations {
                    EmitHelper::write_line(writer, &context, &declaration)?;
                }
            }

            for section in self.sections() {
                if !section.functions.iter().any(|f| self.is_visible(f)) {
                    continue;
                }
                spacer.gap(writer)?;
                EmitHelper::write_header(writer, &context, &section.title())?;
                for function in section.functions {
                    self.emit_one(&function_emitter, function, writer, &mut context, &mut spacer)?;
                }
            }
        } else {
            for function in &self.functions {
                self.emit_one(&function_emitter, function, writer, &mut context, &mut spacer)?;
            }
        }

        if self.config.emit_entry_points {
            let roots: Vec<&str> = self
                .functions
                .iter()
                .filter(|f| f.is_entry_point)
                .map(|f| f.name.as_str())
                .collect();
            if !roots.is_empty() {
                spacer.gap(writer)?;
                EmitHelper::write_header(writer, &context, "entry points")?;
                for root in roots {
                    EmitHelper::write_comment(writer, &context, root)?;
                }
            }
        }

        Ok(())
    }

    pub fn emit_to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.emit(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => self.emit_to_string(),
            OutputFormat::Json => output::to_json(&self.functions),
        }
    }

    fn is_visible(&self, function: &RegisteredFunction) -> bool {
        match function.kind() {
            BodyKind::Ordinary => true,
            BodyKind::Asm => !self.config.group_by_placement,
            BodyKind::Placeholder => self.config.annotate_placeholders,
        }
    }

    fn emit_one<W: Write>(
        &self,
        emitter: &FunctionEmitter,
        function: &RegisteredFunction,
        writer: &mut W,
        context: &mut EmitContext,
        spacer: &mut Spacer,
    ) -> EmitResult {
        if !self.is_visible(function) {
            return Ok(());
        }
        spacer.gap(writer)?;
        emitter.emit(function, writer, context)
    }
}
