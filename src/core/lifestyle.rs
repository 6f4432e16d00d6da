use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::budget::summarize_budget;
use super::types::{BudgetBreakdown, ExpenseGroup, GroupTotal, LifestyleBudget};

/// Monthly spending per category.
pub type MonthlyExpenses = BTreeMap<ExpenseCategory, f64>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseCategory {
    Housing,
    Utilities,
    Food,
    Transportation,
    Insurance,
    PhoneInternet,
    Childcare,
    HealthWellness,
    Subscriptions,
    Discretionary,
    Travel,
    Shopping,
    PersonalCare,
    Giving,
    Investments,
    Education,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [Self; 17] = [
        Self::Housing,
        Self::Utilities,
        Self::Food,
        Self::Transportation,
        Self::Insurance,
        Self::PhoneInternet,
        Self::Childcare,
        Self::HealthWellness,
        Self::Subscriptions,
        Self::Discretionary,
        Self::Travel,
        Self::Shopping,
        Self::PersonalCare,
        Self::Giving,
        Self::Investments,
        Self::Education,
        Self::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Insurance => "insurance",
            Self::PhoneInternet => "phone-internet",
            Self::Childcare => "childcare",
            Self::HealthWellness => "health-wellness",
            Self::Subscriptions => "subscriptions",
            Self::Discretionary => "discretionary",
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::PersonalCare => "personal-care",
            Self::Giving => "giving",
            Self::Investments => "investments",
            Self::Education => "education",
            Self::Other => "other",
        }
    }

    pub fn group(self) -> ExpenseGroup {
        match self {
            Self::Housing
            | Self::Utilities
            | Self::Food
            | Self::Transportation
            | Self::Insurance
            | Self::PhoneInternet
            | Self::Childcare
            | Self::HealthWellness => ExpenseGroup::Essentials,
            Self::Subscriptions | Self::Discretionary | Self::Shopping | Self::PersonalCare => {
                ExpenseGroup::LifeServices
            }
            Self::Travel | Self::Other => ExpenseGroup::Lifestyle,
            Self::Investments | Self::Giving | Self::Education => ExpenseGroup::GoalsGiving,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseholdType {
    Single,
    Couple,
    Family,
    Retiree,
    Student,
}

impl HouseholdType {
    pub const ALL: [Self; 5] = [
        Self::Single,
        Self::Couple,
        Self::Family,
        Self::Retiree,
        Self::Student,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Couple => "couple",
            Self::Family => "family",
            Self::Retiree => "retiree",
            Self::Student => "student",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lifestyle {
    Lean,
    Suburban,
    Urban,
    Nomad,
    Jetsetter,
}

impl Lifestyle {
    pub const ALL: [Self; 5] = [
        Self::Lean,
        Self::Suburban,
        Self::Urban,
        Self::Nomad,
        Self::Jetsetter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Lean => "lean",
            Self::Suburban => "suburban",
            Self::Urban => "urban",
            Self::Nomad => "nomad",
            Self::Jetsetter => "jetsetter",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationTier {
    Rural,
    MidSized,
    MajorMetro,
    CoastalCity,
}

impl LocationTier {
    pub const ALL: [Self; 4] = [
        Self::Rural,
        Self::MidSized,
        Self::MajorMetro,
        Self::CoastalCity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Rural => "rural",
            Self::MidSized => "mid-sized",
            Self::MajorMetro => "major-metro",
            Self::CoastalCity => "coastal-city",
        }
    }

    /// Cost-of-living scale applied to template amounts.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Rural => 0.85,
            Self::MidSized => 1.0,
            Self::MajorMetro => 1.2,
            Self::CoastalCity => 1.35,
        }
    }
}

fn parse_named<T: Copy>(all: &[T], name: fn(T) -> &'static str, s: &str) -> Result<T, String> {
    all.iter()
        .copied()
        .find(|item| name(*item).eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            let choices: Vec<&str> = all.iter().map(|item| name(*item)).collect();
            format!("unknown value '{s}', expected one of: {}", choices.join(", "))
        })
}

macro_rules! named_enum_traits {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_named(&<$ty>::ALL, <$ty>::name, s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    )*};
}

named_enum_traits!(ExpenseCategory, HouseholdType, Lifestyle, LocationTier);

// Amounts follow ExpenseCategory::ALL order.
type TemplateRow = [u32; 17];

const STUDENT: [TemplateRow; 5] = [
    [800, 150, 300, 150, 200, 60, 0, 60, 20, 0, 50, 80, 40, 20, 50, 100, 50],
    [1000, 180, 400, 200, 250, 70, 0, 80, 30, 0, 100, 120, 60, 40, 100, 120, 70],
    [1200, 200, 500, 250, 300, 80, 0, 100, 40, 0, 150, 150, 80, 50, 150, 150, 80],
    [1100, 200, 500, 250, 300, 80, 0, 100, 40, 0, 300, 180, 80, 60, 150, 150, 80],
    [1800, 250, 700, 300, 400, 100, 0, 120, 60, 0, 500, 250, 120, 100, 250, 200, 100],
];

const SINGLE: [TemplateRow; 5] = [
    [1200, 200, 400, 200, 300, 80, 0, 80, 30, 0, 80, 100, 60, 50, 200, 50, 80],
    [1600, 220, 500, 250, 350, 90, 0, 100, 40, 0, 150, 120, 80, 80, 250, 80, 90],
    [1800, 250, 600, 300, 400, 100, 0, 120, 50, 0, 200, 150, 100, 100, 300, 100, 100],
    [1400, 220, 600, 300, 400, 100, 0, 120, 50, 0, 300, 200, 100, 100, 300, 100, 100],
    [2400, 300, 800, 400, 500, 120, 0, 150, 80, 0, 600, 300, 150, 150, 400, 150, 150],
];

const COUPLE: [TemplateRow; 5] = [
    [1600, 250, 600, 250, 400, 100, 0, 100, 40, 0, 150, 150, 80, 100, 300, 100, 100],
    [2000, 280, 800, 350, 550, 110, 0, 120, 50, 0, 200, 200, 100, 120, 350, 120, 120],
    [2200, 300, 900, 400, 600, 120, 0, 150, 60, 0, 300, 250, 120, 150, 400, 150, 150],
    [1800, 280, 900, 400, 600, 120, 0, 150, 70, 0, 500, 300, 150, 150, 450, 150, 150],
    [3000, 400, 1200, 500, 800, 140, 0, 200, 100, 0, 800, 400, 200, 200, 600, 200, 200],
];

const FAMILY: [TemplateRow; 5] = [
    [1800, 250, 700, 300, 500, 80, 500, 100, 30, 0, 100, 150, 80, 100, 300, 100, 100],
    [2400, 300, 900, 500, 700, 100, 800, 150, 50, 0, 300, 250, 120, 150, 500, 200, 150],
    [2200, 300, 900, 400, 600, 100, 700, 150, 50, 0, 200, 200, 120, 150, 400, 200, 150],
    [2000, 300, 800, 400, 600, 100, 600, 150, 50, 0, 400, 250, 120, 150, 450, 200, 150],
    [3000, 400, 1200, 600, 800, 120, 1000, 200, 80, 0, 600, 400, 200, 200, 700, 300, 200],
];

const RETIREE: [TemplateRow; 5] = [
    [1400, 200, 500, 200, 500, 80, 0, 150, 30, 0, 100, 100, 60, 100, 200, 0, 80],
    [1800, 220, 600, 250, 600, 90, 0, 180, 40, 0, 200, 150, 80, 120, 250, 0, 90],
    [2000, 250, 700, 300, 700, 100, 0, 200, 50, 0, 300, 200, 100, 150, 300, 0, 100],
    [1600, 250, 700, 300, 600, 100, 0, 200, 50, 0, 500, 250, 100, 150, 350, 0, 100],
    [2800, 350, 1000, 400, 900, 120, 0, 250, 80, 0, 1000, 400, 150, 200, 500, 0, 150],
];

fn template_row(household: HouseholdType, lifestyle: Lifestyle) -> &'static TemplateRow {
    let rows = match household {
        HouseholdType::Single => &SINGLE,
        HouseholdType::Couple => &COUPLE,
        HouseholdType::Family => &FAMILY,
        HouseholdType::Retiree => &RETIREE,
        HouseholdType::Student => &STUDENT,
    };
    let index = match lifestyle {
        Lifestyle::Lean => 0,
        Lifestyle::Suburban => 1,
        Lifestyle::Urban => 2,
        Lifestyle::Nomad => 3,
        Lifestyle::Jetsetter => 4,
    };
    &rows[index]
}

/// Every category at zero.
pub fn empty_expenses() -> MonthlyExpenses {
    ExpenseCategory::ALL.iter().map(|&c| (c, 0.0)).collect()
}

/// Monthly spending template for a household and lifestyle, scaled to the
/// location and rounded to whole dollars (ties to even).
pub fn expense_template(
    household: HouseholdType,
    lifestyle: Lifestyle,
    location: LocationTier,
) -> MonthlyExpenses {
    let multiplier = location.multiplier();
    ExpenseCategory::ALL
        .iter()
        .zip(template_row(household, lifestyle))
        .map(|(&category, &amount)| {
            (category, (f64::from(amount) * multiplier).round_ties_even())
        })
        .collect()
}

/// Monthly and annual totals per expense group.
pub fn budget_breakdown(expenses: &MonthlyExpenses) -> BudgetBreakdown {
    let groups: Vec<GroupTotal> = ExpenseGroup::ALL
        .iter()
        .map(|&group| {
            let monthly: f64 = expenses
                .iter()
                .filter(|(category, _)| category.group() == group)
                .map(|(_, amount)| amount)
                .sum();
            GroupTotal {
                group,
                monthly,
                annual: monthly * 12.0,
            }
        })
        .collect();
    let monthly_total: f64 = expenses.values().sum();

    BudgetBreakdown {
        groups,
        monthly_total,
        annual_total: monthly_total * 12.0,
    }
}

/// Itemized monthly spending checked against income and the savings plan.
pub fn summarize_lifestyle_budget(
    annual_income: f64,
    annual_savings: f64,
    expenses: MonthlyExpenses,
) -> LifestyleBudget {
    let breakdown = budget_breakdown(&expenses);
    let summary = summarize_budget(annual_income, breakdown.annual_total, annual_savings);
    LifestyleBudget {
        expenses,
        breakdown,
        summary,
    }
}
