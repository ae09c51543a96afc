//! The closed set of compiler directives.
//!
//! Every `#name` the language knows is one [`Directive`] variant. The lexer
//! resolves the spelling once through [`DIRECTIVE_LOOKUP`], after that the
//! parser only ever matches on the variant and on its [`DirectiveOperand`].

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    pub static ref DIRECTIVE_LOOKUP: HashMap<&'static str, Directive> = {
        let mut map = HashMap::new();
        for directive in Directive::ALL {
            map.insert(directive.lexeme(), directive);
        }
        map
    };
}

/// What a directive consumes after its own token.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DirectiveOperand {
    /// Bare marker (`#c_call`, `#this`).
    None,
    /// Always followed by an expression (`#run e`).
    Expression,
    /// Followed by an expression when one starts on the same line (`#insert`).
    OptionalExpression,
    /// Followed by a string literal when one is present (`#deprecated`).
    OptionalString,
    /// `#foreign lib "symbol"`.
    ForeignName,
    /// `#bake proc(args)`.
    Bake,
    /// Followed by a type when one is present (`#type,isa int`).
    OptionalType,
    /// A block or an expression (`#code { ... }`).
    CodeBody,
    /// A parenthesised parameter list (`#module_parameters(...)`).
    ParameterList,
    /// Owned by the here-string lexer rule.
    HereString,
    /// Only meaningful at statement start (`#import`, `#scope_file`).
    StatementOnly,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Directive {
    Import,
    ImportFile,
    ImportDir,
    ImportString,
    Load,
    ForeignLibrary,
    ForeignSystemLibrary,
    Run,
    Assert,
    If,
    Ifx,
    Compiler,
    Intrinsic,
    RuntimeSupport,
    Deprecated,
    Foreign,
    CCall,
    NoContext,
    Symmetric,
    Must,
    Expand,
    Bake,
    BakeArguments,
    BakeConstants,
    AddContext,
    Align,
    As,
    Bytes,
    CallerCode,
    CallerLocation,
    Code,
    CodeNull,
    CodeTyped,
    CompileTime,
    Complete,
    Dump,
    Elsewhere,
    File,
    Filepath,
    Insert,
    InsertScope,
    Modify,
    ModuleParameters,
    NoAbc,
    NoAlias,
    NoPadding,
    NoReset,
    Place,
    Placeholder,
    ProcedureName,
    ProcedureOfCall,
    ProgramExport,
    Specified,
    This,
    Through,
    Type,
    TypeIsa,
    TypeDistinct,
    TypeInfoNone,
    TypeInfoProceduresAreVoidPointers,
    TypeInfoNoSizeComplaint,
    Unshared,
    Char,
    Asm,
    ScopeExport,
    ScopeFile,
    ScopeModule,
    String,
}

impl Directive {
    pub const ALL: [Directive; 68] = [
        Directive::Import,
        Directive::ImportFile,
        Directive::ImportDir,
        Directive::ImportString,
        Directive::Load,
        Directive::ForeignLibrary,
        Directive::ForeignSystemLibrary,
        Directive::Run,
        Directive::Assert,
        Directive::If,
        Directive::Ifx,
        Directive::Compiler,
        Directive::Intrinsic,
        Directive::RuntimeSupport,
        Directive::Deprecated,
        Directive::Foreign,
        Directive::CCall,
        Directive::NoContext,
        Directive::Symmetric,
        Directive::Must,
        Directive::Expand,
        Directive::Bake,
        Directive::BakeArguments,
        Directive::BakeConstants,
        Directive::AddContext,
        Directive::Align,
        Directive::As,
        Directive::Bytes,
        Directive::CallerCode,
        Directive::CallerLocation,
        Directive::Code,
        Directive::CodeNull,
        Directive::CodeTyped,
        Directive::CompileTime,
        Directive::Complete,
        Directive::Dump,
        Directive::Elsewhere,
        Directive::File,
        Directive::Filepath,
        Directive::Insert,
        Directive::InsertScope,
        Directive::Modify,
        Directive::ModuleParameters,
        Directive::NoAbc,
        Directive::NoAlias,
        Directive::NoPadding,
        Directive::NoReset,
        Directive::Place,
        Directive::Placeholder,
        Directive::ProcedureName,
        Directive::ProcedureOfCall,
        Directive::ProgramExport,
        Directive::Specified,
        Directive::This,
        Directive::Through,
        Directive::Type,
        Directive::TypeIsa,
        Directive::TypeDistinct,
        Directive::TypeInfoNone,
        Directive::TypeInfoProceduresAreVoidPointers,
        Directive::TypeInfoNoSizeComplaint,
        Directive::Unshared,
        Directive::Char,
        Directive::Asm,
        Directive::ScopeExport,
        Directive::ScopeFile,
        Directive::ScopeModule,
        Directive::String,
    ];

    pub fn lexeme(&self) -> &'static str {
        match self {
            Directive::Import => "#import",
            Directive::ImportFile => "#import,file",
            Directive::ImportDir => "#import,dir",
            Directive::ImportString => "#import,string",
            Directive::Load => "#load",
            Directive::ForeignLibrary => "#foreign_library",
            Directive::ForeignSystemLibrary => "#foreign_system_library",
            Directive::Run => "#run",
            Directive::Assert => "#assert",
            Directive::If => "#if",
            Directive::Ifx => "#ifx",
            Directive::Compiler => "#compiler",
            Directive::Intrinsic => "#intrinsic",
            Directive::RuntimeSupport => "#runtime_support",
            Directive::Deprecated => "#deprecated",
            Directive::Foreign => "#foreign",
            Directive::CCall => "#c_call",
            Directive::NoContext => "#no_context",
            Directive::Symmetric => "#symmetric",
            Directive::Must => "#must",
            Directive::Expand => "#expand",
            Directive::Bake => "#bake",
            Directive::BakeArguments => "#bake_arguments",
            Directive::BakeConstants => "#bake_constants",
            Directive::AddContext => "#add_context",
            Directive::Align => "#align",
            Directive::As => "#as",
            Directive::Bytes => "#bytes",
            Directive::CallerCode => "#caller_code",
            Directive::CallerLocation => "#caller_location",
            Directive::Code => "#code",
            Directive::CodeNull => "#code,null",
            Directive::CodeTyped => "#code,typed",
            Directive::CompileTime => "#compile_time",
            Directive::Complete => "#complete",
            Directive::Dump => "#dump",
            Directive::Elsewhere => "#elsewhere",
            Directive::File => "#file",
            Directive::Filepath => "#filepath",
            Directive::Insert => "#insert",
            Directive::InsertScope => "#insert,scope",
            Directive::Modify => "#modify",
            Directive::ModuleParameters => "#module_parameters",
            Directive::NoAbc => "#no_abc",
            Directive::NoAlias => "#no_alias",
            Directive::NoPadding => "#no_padding",
            Directive::NoReset => "#no_reset",
            Directive::Place => "#place",
            Directive::Placeholder => "#placeholder",
            Directive::ProcedureName => "#procedure_name",
            Directive::ProcedureOfCall => "#procedure_of_call",
            Directive::ProgramExport => "#program_export",
            Directive::Specified => "#specified",
            Directive::This => "#this",
            Directive::Through => "#through",
            Directive::Type => "#type",
            Directive::TypeIsa => "#type,isa",
            Directive::TypeDistinct => "#type,distinct",
            Directive::TypeInfoNone => "#type_info_none",
            Directive::TypeInfoProceduresAreVoidPointers => {
                "#type_info_procedures_are_void_pointers"
            }
            Directive::TypeInfoNoSizeComplaint => "#type_info_no_size_complaint",
            Directive::Unshared => "#unshared",
            Directive::Char => "#char",
            Directive::Asm => "#asm",
            Directive::ScopeExport => "#scope_export",
            Directive::ScopeFile => "#scope_file",
            Directive::ScopeModule => "#scope_module",
            Directive::String => "#string",
        }
    }

    pub fn operand(&self) -> DirectiveOperand {
        match self {
            Directive::Import
            | Directive::ImportFile
            | Directive::ImportDir
            | Directive::ImportString
            | Directive::Load
            | Directive::ForeignLibrary
            | Directive::ForeignSystemLibrary
            | Directive::Asm
            | Directive::ScopeExport
            | Directive::ScopeFile
            | Directive::ScopeModule => DirectiveOperand::StatementOnly,

            Directive::String => DirectiveOperand::HereString,

            Directive::Run
            | Directive::Assert
            | Directive::If
            | Directive::Ifx
            | Directive::ProcedureOfCall => DirectiveOperand::Expression,

            Directive::Insert
            | Directive::InsertScope
            | Directive::Align
            | Directive::Place
            | Directive::Placeholder
            | Directive::ProcedureName
            | Directive::Complete
            | Directive::Elsewhere
            | Directive::Bytes => DirectiveOperand::OptionalExpression,

            Directive::Deprecated | Directive::ProgramExport | Directive::Char => {
                DirectiveOperand::OptionalString
            }

            Directive::Foreign => DirectiveOperand::ForeignName,

            Directive::Bake | Directive::BakeArguments | Directive::BakeConstants => {
                DirectiveOperand::Bake
            }

            Directive::Type | Directive::TypeIsa | Directive::TypeDistinct => {
                DirectiveOperand::OptionalType
            }

            Directive::Code | Directive::CodeNull | Directive::CodeTyped | Directive::Modify => {
                DirectiveOperand::CodeBody
            }

            Directive::ModuleParameters => DirectiveOperand::ParameterList,

            Directive::Compiler
            | Directive::Intrinsic
            | Directive::RuntimeSupport
            | Directive::CCall
            | Directive::NoContext
            | Directive::Symmetric
            | Directive::Must
            | Directive::Expand
            | Directive::AddContext
            | Directive::As
            | Directive::CallerCode
            | Directive::CallerLocation
            | Directive::CompileTime
            | Directive::Dump
            | Directive::File
            | Directive::Filepath
            | Directive::NoAbc
            | Directive::NoAlias
            | Directive::NoPadding
            | Directive::NoReset
            | Directive::Specified
            | Directive::This
            | Directive::Through
            | Directive::TypeInfoNone
            | Directive::TypeInfoProceduresAreVoidPointers
            | Directive::TypeInfoNoSizeComplaint
            | Directive::Unshared => DirectiveOperand::None,
        }
    }

    pub fn is_bake(&self) -> bool {
        matches!(
            self,
            Directive::Bake | Directive::BakeArguments | Directive::BakeConstants
        )
    }

    pub fn is_import(&self) -> bool {
        matches!(
            self,
            Directive::Import | Directive::ImportFile | Directive::ImportDir | Directive::ImportString
        )
    }

    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            Directive::ScopeExport | Directive::ScopeFile | Directive::ScopeModule
        )
    }

    /// Directives that may trail a procedure signature, even on a later line.
    pub fn is_procedure_suffix(&self) -> bool {
        matches!(
            self,
            Directive::CCall
                | Directive::NoContext
                | Directive::Symmetric
                | Directive::Compiler
                | Directive::Intrinsic
                | Directive::RuntimeSupport
                | Directive::Deprecated
                | Directive::Foreign
                | Directive::Must
                | Directive::Expand
                | Directive::Modify
                | Directive::Elsewhere
                | Directive::ProgramExport
                | Directive::NoAlias
                | Directive::NoAbc
                | Directive::Dump
                | Directive::CompileTime
        )
    }

    /// Directives that can be written in expression position at all.
    pub fn is_expression(&self) -> bool {
        !matches!(self.operand(), DirectiveOperand::StatementOnly)
    }
}
