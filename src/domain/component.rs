use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ComponentId = u32;

/// How a component's value enters the gross pay formula.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ComponentOperation {
    Sum,
    Subtract,
}

/// A configurable named earning or deduction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub operation: ComponentOperation,
}

/// A component together with the value applied to one ledger record. The
/// component is snapshotted so a later configuration change cannot alter an
/// already-written register.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct AppliedComponent {
    pub component: Component,
    pub value: Decimal,
}

/// Gross pay: the base amount plus earning components minus deductions.
pub fn gross_pay(base: Decimal, components: &[AppliedComponent]) -> Decimal {
    components
        .iter()
        .fold(base, |gross, applied| match applied.component.operation {
            ComponentOperation::Sum => gross + applied.value,
            ComponentOperation::Subtract => gross - applied.value,
        })
}
