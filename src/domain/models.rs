use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub full_name: String,
    pub date_of_birth: String,
    pub sin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    FullName,
    DateOfBirth,
    Sin,
    Address,
    Phone,
    Email,
}

impl PartyField {
    pub const ALL: [PartyField; 6] = [
        PartyField::FullName,
        PartyField::DateOfBirth,
        PartyField::Sin,
        PartyField::Address,
        PartyField::Phone,
        PartyField::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PartyField::FullName => "Full Legal Name",
            PartyField::DateOfBirth => "Date of Birth",
            PartyField::Sin => "Social Insurance Number",
            PartyField::Address => "Address",
            PartyField::Phone => "Phone Number",
            PartyField::Email => "Email",
        }
    }
}

impl Party {
    pub fn field(&self, field: PartyField) -> &str {
        match field {
            PartyField::FullName => &self.full_name,
            PartyField::DateOfBirth => &self.date_of_birth,
            PartyField::Sin => &self.sin,
            PartyField::Address => &self.address,
            PartyField::Phone => &self.phone,
            PartyField::Email => &self.email,
        }
    }

    fn set(&mut self, field: PartyField, value: String) {
        match field {
            PartyField::FullName => self.full_name = value,
            PartyField::DateOfBirth => self.date_of_birth = value,
            PartyField::Sin => self.sin = value,
            PartyField::Address => self.address = value,
            PartyField::Phone => self.phone = value,
            PartyField::Email => self.email = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    #[serde(flatten)]
    pub party: Party,
    pub relationship: String,
    pub distribution_instructions: String,
}

/// The beneficiary fields exposed by the form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeneficiaryField {
    FullName,
    Relationship,
    DateOfBirth,
    Sin,
    Address,
    DistributionInstructions,
}

impl BeneficiaryField {
    pub const ALL: [BeneficiaryField; 6] = [
        BeneficiaryField::FullName,
        BeneficiaryField::Relationship,
        BeneficiaryField::DateOfBirth,
        BeneficiaryField::Sin,
        BeneficiaryField::Address,
        BeneficiaryField::DistributionInstructions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BeneficiaryField::FullName => "Full Legal Name",
            BeneficiaryField::Relationship => "Relationship to Settlor",
            BeneficiaryField::DateOfBirth => "Date of Birth",
            BeneficiaryField::Sin => "Social Insurance Number",
            BeneficiaryField::Address => "Address",
            BeneficiaryField::DistributionInstructions => "Distribution Instructions",
        }
    }
}

impl Beneficiary {
    pub fn field(&self, field: BeneficiaryField) -> &str {
        match field {
            BeneficiaryField::FullName => &self.party.full_name,
            BeneficiaryField::Relationship => &self.relationship,
            BeneficiaryField::DateOfBirth => &self.party.date_of_birth,
            BeneficiaryField::Sin => &self.party.sin,
            BeneficiaryField::Address => &self.party.address,
            BeneficiaryField::DistributionInstructions => &self.distribution_instructions,
        }
    }

    fn set(&mut self, field: BeneficiaryField, value: String) {
        match field {
            BeneficiaryField::FullName => self.party.full_name = value,
            BeneficiaryField::Relationship => self.relationship = value,
            BeneficiaryField::DateOfBirth => self.party.date_of_birth = value,
            BeneficiaryField::Sin => self.party.sin = value,
            BeneficiaryField::Address => self.party.address = value,
            BeneficiaryField::DistributionInstructions => self.distribution_instructions = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub trust_type: String,
    pub purpose: String,
    pub initial_property: String,
}

impl Default for TrustDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            trust_type: "inter-vivos".to_string(),
            purpose: String::new(),
            initial_property: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustDetailsField {
    Name,
    Type,
    Purpose,
    InitialProperty,
}

impl TrustDetailsField {
    pub const ALL: [TrustDetailsField; 4] = [
        TrustDetailsField::Name,
        TrustDetailsField::Type,
        TrustDetailsField::Purpose,
        TrustDetailsField::InitialProperty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrustDetailsField::Name => "Trust Name",
            TrustDetailsField::Type => "Trust Type",
            TrustDetailsField::Purpose => "Purpose",
            TrustDetailsField::InitialProperty => "Initial Property",
        }
    }
}

impl TrustDetails {
    pub fn field(&self, field: TrustDetailsField) -> &str {
        match field {
            TrustDetailsField::Name => &self.name,
            TrustDetailsField::Type => &self.trust_type,
            TrustDetailsField::Purpose => &self.purpose,
            TrustDetailsField::InitialProperty => &self.initial_property,
        }
    }

    fn set(&mut self, field: TrustDetailsField, value: String) {
        match field {
            TrustDetailsField::Name => self.name = value,
            TrustDetailsField::Type => self.trust_type = value,
            TrustDetailsField::Purpose => self.purpose = value,
            TrustDetailsField::InitialProperty => self.initial_property = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalProvisions {
    pub duration: String,
    pub trustee_powers: String,
    pub successor_trustee: String,
    pub distribution_plan: String,
    pub special_instructions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalAdvisors {
    pub lawyer: Advisor,
    pub accountant: Advisor,
}

/// Financial planning inputs, kept as entered and parsed only at
/// projection time. The monthly contribution is derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPlanning {
    pub current_income: String,
    pub goal_amount: String,
    pub target_date: String,
    pub financial_goal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancialField {
    CurrentIncome,
    GoalAmount,
    TargetDate,
    FinancialGoal,
}

impl FinancialField {
    pub const ALL: [FinancialField; 4] = [
        FinancialField::CurrentIncome,
        FinancialField::GoalAmount,
        FinancialField::TargetDate,
        FinancialField::FinancialGoal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FinancialField::CurrentIncome => "Current Annual Income",
            FinancialField::GoalAmount => "Target Goal Amount",
            FinancialField::TargetDate => "Target Achievement Date",
            FinancialField::FinancialGoal => "Financial Goals",
        }
    }
}

impl FinancialPlanning {
    pub fn field(&self, field: FinancialField) -> &str {
        match field {
            FinancialField::CurrentIncome => &self.current_income,
            FinancialField::GoalAmount => &self.goal_amount,
            FinancialField::TargetDate => &self.target_date,
            FinancialField::FinancialGoal => &self.financial_goal,
        }
    }

    fn set(&mut self, field: FinancialField, value: String) {
        match field {
            FinancialField::CurrentIncome => self.current_income = value,
            FinancialField::GoalAmount => self.goal_amount = value,
            FinancialField::TargetDate => self.target_date = value,
            FinancialField::FinancialGoal => self.financial_goal = value,
        }
    }
}

/// Address of a single editable leaf field inside the application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Settlor(PartyField),
    Trustee(PartyField),
    Beneficiary(usize, BeneficiaryField),
    TrustDetails(TrustDetailsField),
    Financial(FinancialField),
}

impl FieldRef {
    pub fn label(self) -> &'static str {
        match self {
            FieldRef::Settlor(f) | FieldRef::Trustee(f) => f.label(),
            FieldRef::Beneficiary(_, f) => f.label(),
            FieldRef::TrustDetails(f) => f.label(),
            FieldRef::Financial(f) => f.label(),
        }
    }
}

/// The root record for one trust-fund application.
///
/// Lives only in memory for the session. Every update operation takes
/// `&self` and returns a new record with one branch replaced, so callers
/// always swap in a whole new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustApplication {
    pub settlor: Party,
    pub trustee: Party,
    pub beneficiaries: Vec<Beneficiary>,
    pub trust_details: TrustDetails,
    pub additional_provisions: AdditionalProvisions,
    pub professional_advisors: ProfessionalAdvisors,
    pub financial_planning: FinancialPlanning,
}

impl Default for TrustApplication {
    fn default() -> Self {
        Self {
            settlor: Party::default(),
            trustee: Party::default(),
            // The beneficiary list never drops below one entry.
            beneficiaries: vec![Beneficiary::default()],
            trust_details: TrustDetails::default(),
            additional_provisions: AdditionalProvisions::default(),
            professional_advisors: ProfessionalAdvisors::default(),
            financial_planning: FinancialPlanning::default(),
        }
    }
}

impl TrustApplication {
    /// Reads one leaf field. An out-of-range beneficiary index reads as empty.
    pub fn field(&self, field: FieldRef) -> &str {
        match field {
            FieldRef::Settlor(f) => self.settlor.field(f),
            FieldRef::Trustee(f) => self.trustee.field(f),
            FieldRef::Beneficiary(index, f) => self
                .beneficiaries
                .get(index)
                .map(|b| b.field(f))
                .unwrap_or(""),
            FieldRef::TrustDetails(f) => self.trust_details.field(f),
            FieldRef::Financial(f) => self.financial_planning.field(f),
        }
    }

    /// Returns a new record with one leaf field replaced and every other
    /// field retained. An out-of-range beneficiary index changes nothing.
    pub fn with_field(&self, field: FieldRef, value: String) -> Self {
        let mut next = self.clone();
        match field {
            FieldRef::Settlor(f) => next.settlor.set(f, value),
            FieldRef::Trustee(f) => next.trustee.set(f, value),
            FieldRef::Beneficiary(index, f) => {
                if let Some(beneficiary) = next.beneficiaries.get_mut(index) {
                    beneficiary.set(f, value);
                }
            }
            FieldRef::TrustDetails(f) => next.trust_details.set(f, value),
            FieldRef::Financial(f) => next.financial_planning.set(f, value),
        }
        next
    }

    /// Returns a new record with one all-empty beneficiary appended.
    pub fn add_beneficiary(&self) -> Self {
        let mut next = self.clone();
        next.beneficiaries.push(Beneficiary::default());
        next
    }

    /// Returns a new record with the beneficiary at `index` removed.
    ///
    /// Guarded no-op whenever removal would leave the list empty or the
    /// index is out of range.
    pub fn remove_beneficiary(&self, index: usize) -> Self {
        let mut next = self.clone();
        if next.beneficiaries.len() > 1 && index < next.beneficiaries.len() {
            next.beneficiaries.remove(index);
        }
        next
    }
}
