/// User-defined operators, keyed by their metadata name (`op_Addition`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorType {
    LogicalNot,
    OnesComplement,
    Increment,
    Decrement,
    True,
    False,
    UnaryPlus,
    UnaryNegation,
    Addition,
    Subtraction,
    Multiply,
    Division,
    Modulus,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    LeftShift,
    RightShift,
    Equality,
    Inequality,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Implicit,
    Explicit,
}

const OPERATORS: &[(OperatorType, &str, &str)] = &[
    (OperatorType::LogicalNot, "op_LogicalNot", "!"),
    (OperatorType::OnesComplement, "op_OnesComplement", "~"),
    (OperatorType::Increment, "op_Increment", "++"),
    (OperatorType::Decrement, "op_Decrement", "--"),
    (OperatorType::True, "op_True", "true"),
    (OperatorType::False, "op_False", "false"),
    (OperatorType::UnaryPlus, "op_UnaryPlus", "+"),
    (OperatorType::UnaryNegation, "op_UnaryNegation", "-"),
    (OperatorType::Addition, "op_Addition", "+"),
    (OperatorType::Subtraction, "op_Subtraction", "-"),
    (OperatorType::Multiply, "op_Multiply", "*"),
    (OperatorType::Division, "op_Division", "/"),
    (OperatorType::Modulus, "op_Modulus", "%"),
    (OperatorType::BitwiseAnd, "op_BitwiseAnd", "&"),
    (OperatorType::BitwiseOr, "op_BitwiseOr", "|"),
    (OperatorType::ExclusiveOr, "op_ExclusiveOr", "^"),
    (OperatorType::LeftShift, "op_LeftShift", "<<"),
    (OperatorType::RightShift, "op_RightShift", ">>"),
    (OperatorType::Equality, "op_Equality", "=="),
    (OperatorType::Inequality, "op_Inequality", "!="),
    (OperatorType::GreaterThan, "op_GreaterThan", ">"),
    (OperatorType::LessThan, "op_LessThan", "<"),
    (OperatorType::GreaterThanOrEqual, "op_GreaterThanOrEqual", ">="),
    (OperatorType::LessThanOrEqual, "op_LessThanOrEqual", "<="),
    (OperatorType::Implicit, "op_Implicit", "implicit"),
    (OperatorType::Explicit, "op_Explicit", "explicit"),
];

impl OperatorType {
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(_, name, _)| *name == identifier)
            .map(|(operator, _, _)| *operator)
    }

    pub fn identifier(self) -> &'static str {
        self.entry().1
    }

    pub fn token(self) -> &'static str {
        self.entry().2
    }

    pub fn is_conversion(self) -> bool {
        matches!(self, OperatorType::Implicit | OperatorType::Explicit)
    }

    fn entry(self) -> &'static (OperatorType, &'static str, &'static str) {
        // Every variant has exactly one row.
        OPERATORS
            .iter()
            .find(|(operator, _, _)| *operator == self)
            .unwrap_or(&OPERATORS[0])
    }
}
