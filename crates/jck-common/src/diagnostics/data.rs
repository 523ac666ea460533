use super::{DiagnosticCategory, DiagnosticMessage};

/// Diagnostic codes.
///
/// 1xxx: structural pass, 11xx: override checks, 2xxx: checking pass,
/// 9xxx: internal errors (checker defects).
pub mod diagnostic_codes {
    pub const CANNOT_FIND_SYMBOL_CLASS: u32 = 1001;
    pub const TYPE_NOT_ACCESSIBLE: u32 = 1002;
    pub const CYCLIC_INHERITANCE: u32 = 1003;
    pub const DUPLICATE_FIELD: u32 = 1004;
    pub const DUPLICATE_PARAMETER: u32 = 1005;
    pub const METHOD_NAMED_AS_CLASS: u32 = 1006;
    pub const DUPLICATE_METHOD: u32 = 1007;
    pub const STATIC_FINAL_NOT_INITIALIZED: u32 = 1008;
    pub const INTERFACE_METHOD_BODY_NOT_ALLOWED: u32 = 1009;
    pub const ABSTRACT_METHOD_WITH_BODY: u32 = 1010;
    pub const MISSING_METHOD_BODY: u32 = 1011;
    pub const CANNOT_INHERIT_FROM_FINAL: u32 = 1012;
    pub const INTERFACE_EXPECTED: u32 = 1013;
    pub const NO_INTERFACE_EXPECTED: u32 = 1014;
    pub const DUPLICATE_CLASS: u32 = 1015;

    pub const OVERRIDE_RETURN_TYPE: u32 = 1101;
    pub const OVERRIDE_WEAKER_ACCESS: u32 = 1102;
    pub const OVERRIDE_FINAL: u32 = 1103;
    pub const OVERRIDE_STATIC_MISMATCH: u32 = 1104;

    pub const CANNOT_ASSIGN_FINAL: u32 = 2001;
    pub const MAY_NOT_HAVE_VALUE: u32 = 2002;
    pub const FINAL_FIELD_NOT_INITIALIZED: u32 = 2003;
    pub const FINAL_FIELD_NOT_INITIALIZED_DEFAULT_CONSTRUCTOR: u32 = 2004;
    pub const CANNOT_FIND_SYMBOL_VARIABLE: u32 = 2005;
    pub const CANNOT_FIND_SYMBOL_METHOD: u32 = 2006;
    pub const METHOD_NOT_APPLICABLE: u32 = 2007;
    pub const NO_SUITABLE_CONSTRUCTOR: u32 = 2008;
    pub const ABSTRACT_INSTANTIATION: u32 = 2009;
    pub const MEMBER_NOT_ACCESSIBLE: u32 = 2010;
    pub const MISSING_RETURN: u32 = 2011;
    pub const MISSING_RETURN_VALUE: u32 = 2012;
    pub const RETURN_VALUE_IN_CONSTRUCTOR: u32 = 2013;
    pub const CONSTRUCTOR_CALL_NOT_FIRST: u32 = 2014;
    pub const RECURSIVE_CONSTRUCTOR_INVOCATION: u32 = 2015;
    pub const DUPLICATE_LOCAL: u32 = 2016;
    pub const UNREACHABLE_STATEMENT: u32 = 2017;
    pub const ASSIGNED_IN_LOOP: u32 = 2018;
    pub const NO_DEFAULT_SUPER_CONSTRUCTOR: u32 = 2019;
    pub const NESTING_TOO_DEEP: u32 = 2020;
    pub const NON_STATIC_FROM_STATIC: u32 = 2021;

    pub const INTERNAL_UNMATCHED_DECLARATION: u32 = 9001;
}

/// Message templates, one per code.
pub mod diagnostic_messages {
    pub const CANNOT_FIND_SYMBOL_CLASS: &str = "cannot find symbol: class {0}";
    pub const TYPE_NOT_ACCESSIBLE: &str = "{0} is not accessible from {1}";
    pub const CYCLIC_INHERITANCE: &str = "cyclic inheritance involving {0}";
    pub const DUPLICATE_FIELD: &str =
        "duplicate field {0}: a field with this name is already declared in {1}";
    pub const DUPLICATE_PARAMETER: &str = "duplicate parameter {0} in {1}";
    pub const METHOD_NAMED_AS_CLASS: &str =
        "method {0} has the same name as its class; only constructors may use the class name";
    pub const DUPLICATE_METHOD: &str = "method {0} is already defined in {1}";
    pub const STATIC_FINAL_NOT_INITIALIZED: &str =
        "the static final field {0} must be initialized at its declaration";
    pub const INTERFACE_METHOD_BODY_NOT_ALLOWED: &str =
        "interface method {0} cannot have a body at language level {1}";
    pub const ABSTRACT_METHOD_WITH_BODY: &str = "abstract method {0} cannot have a body";
    pub const MISSING_METHOD_BODY: &str = "missing method body, or declare {0} abstract";
    pub const CANNOT_INHERIT_FROM_FINAL: &str = "cannot inherit from final {0}";
    pub const INTERFACE_EXPECTED: &str = "interface expected here: {0} is a class";
    pub const NO_INTERFACE_EXPECTED: &str = "no interface expected here: {0} is an interface";
    pub const DUPLICATE_CLASS: &str = "duplicate class {0}";

    pub const OVERRIDE_RETURN_TYPE: &str =
        "{0}() in {1} cannot override {0}() in {2}; attempting to use different return types";
    pub const OVERRIDE_WEAKER_ACCESS: &str = "{0}() in {1} cannot override {0}() in {2}; attempting to assign weaker access privileges; was {3}";
    pub const OVERRIDE_FINAL: &str =
        "{0}() in {1} cannot override {0}() in {2}; overridden method is final";
    pub const OVERRIDE_STATIC_MISMATCH: &str =
        "{0}() in {1} cannot override {0}() in {2}; {3} method is static";

    pub const CANNOT_ASSIGN_FINAL: &str =
        "cannot assign a value to {0} because it is immutable and has already been given a value";
    pub const MAY_NOT_HAVE_VALUE: &str =
        "cannot use {0} because it may not have been given a value";
    pub const FINAL_FIELD_NOT_INITIALIZED: &str =
        "The final field {0} has not been initialized in constructor {1}";
    pub const FINAL_FIELD_NOT_INITIALIZED_DEFAULT_CONSTRUCTOR: &str =
        "The final field {0} has not been initialized in the default constructor of {1}";
    pub const CANNOT_FIND_SYMBOL_VARIABLE: &str = "cannot find symbol: variable {0}";
    pub const CANNOT_FIND_SYMBOL_METHOD: &str = "cannot find symbol: method {0}";
    pub const METHOD_NOT_APPLICABLE: &str =
        "method {0} in {1} cannot be applied to the given argument types ({2})";
    pub const NO_SUITABLE_CONSTRUCTOR: &str = "no suitable constructor found for {0}({1})";
    pub const ABSTRACT_INSTANTIATION: &str = "{0} is abstract; cannot be instantiated";
    pub const MEMBER_NOT_ACCESSIBLE: &str = "{0} has {1} access in {2}";
    pub const MISSING_RETURN: &str = "this method is missing a return statement";
    pub const MISSING_RETURN_VALUE: &str = "this method must return a value of type {0}";
    pub const RETURN_VALUE_IN_CONSTRUCTOR: &str = "cannot return a value from a constructor";
    pub const CONSTRUCTOR_CALL_NOT_FIRST: &str = "call to {0} must be first statement in constructor";
    pub const RECURSIVE_CONSTRUCTOR_INVOCATION: &str = "recursive constructor invocation: {0}";
    pub const DUPLICATE_LOCAL: &str = "variable {0} is already defined in this scope";
    pub const UNREACHABLE_STATEMENT: &str = "unreachable statement";
    pub const ASSIGNED_IN_LOOP: &str = "variable {0} might be assigned in loop";
    pub const NO_DEFAULT_SUPER_CONSTRUCTOR: &str =
        "no no-argument constructor available in superclass {0}";
    pub const NESTING_TOO_DEEP: &str = "nesting exceeds the supported depth of {0}";
    pub const NON_STATIC_FROM_STATIC: &str =
        "non-static variable {0} cannot be referenced from a static context";

    pub const INTERNAL_UNMATCHED_DECLARATION: &str = "internal program error: no registered declaration matches {0} in {1}; please report this bug";
}

macro_rules! message {
    ($name:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::Error,
            message: diagnostic_messages::$name,
        }
    };
    ($name:ident, $category:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::$category,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(CANNOT_FIND_SYMBOL_CLASS),
    message!(TYPE_NOT_ACCESSIBLE),
    message!(CYCLIC_INHERITANCE),
    message!(DUPLICATE_FIELD),
    message!(DUPLICATE_PARAMETER),
    message!(METHOD_NAMED_AS_CLASS),
    message!(DUPLICATE_METHOD),
    message!(STATIC_FINAL_NOT_INITIALIZED),
    message!(INTERFACE_METHOD_BODY_NOT_ALLOWED),
    message!(ABSTRACT_METHOD_WITH_BODY),
    message!(MISSING_METHOD_BODY),
    message!(CANNOT_INHERIT_FROM_FINAL),
    message!(INTERFACE_EXPECTED),
    message!(NO_INTERFACE_EXPECTED),
    message!(DUPLICATE_CLASS),
    message!(OVERRIDE_RETURN_TYPE),
    message!(OVERRIDE_WEAKER_ACCESS),
    message!(OVERRIDE_FINAL),
    message!(OVERRIDE_STATIC_MISMATCH),
    message!(CANNOT_ASSIGN_FINAL),
    message!(MAY_NOT_HAVE_VALUE),
    message!(FINAL_FIELD_NOT_INITIALIZED),
    message!(FINAL_FIELD_NOT_INITIALIZED_DEFAULT_CONSTRUCTOR),
    message!(CANNOT_FIND_SYMBOL_VARIABLE),
    message!(CANNOT_FIND_SYMBOL_METHOD),
    message!(METHOD_NOT_APPLICABLE),
    message!(NO_SUITABLE_CONSTRUCTOR),
    message!(ABSTRACT_INSTANTIATION),
    message!(MEMBER_NOT_ACCESSIBLE),
    message!(MISSING_RETURN),
    message!(MISSING_RETURN_VALUE),
    message!(RETURN_VALUE_IN_CONSTRUCTOR),
    message!(CONSTRUCTOR_CALL_NOT_FIRST),
    message!(RECURSIVE_CONSTRUCTOR_INVOCATION),
    message!(DUPLICATE_LOCAL),
    message!(UNREACHABLE_STATEMENT),
    message!(ASSIGNED_IN_LOOP),
    message!(NO_DEFAULT_SUPER_CONSTRUCTOR),
    message!(NESTING_TOO_DEEP),
    message!(NON_STATIC_FROM_STATIC),
    message!(INTERNAL_UNMATCHED_DECLARATION, Internal),
];
