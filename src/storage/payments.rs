//! Contribution payment repository (payments.json)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CasaError;
use crate::models::{Category, Member, Payment, PaymentId, PeriodId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PaymentData {
    payments: Vec<Payment>,
}

/// Repository for contribution payments
pub struct PaymentRepository {
    path: PathBuf,
    data: RwLock<HashMap<PaymentId, Payment>>,
}

impl PaymentRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), CasaError> {
        let file_data: PaymentData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        data.clear();
        for payment in file_data.payments {
            data.insert(payment.id, payment);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), CasaError> {
        let mut payments: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        payments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_json_atomic(&self.path, &PaymentData { payments })
    }

    /// The payment a member has for a category in a period, if any
    pub fn find(
        &self,
        member: Member,
        period_id: PeriodId,
        category: Category,
    ) -> Result<Option<Payment>, CasaError> {
        Ok(read_lock(&self.data)?
            .values()
            .find(|p| p.member == member && p.period_id == period_id && p.category == category)
            .cloned())
    }

    pub fn get_for_period(&self, period_id: PeriodId) -> Result<Vec<Payment>, CasaError> {
        let mut payments: Vec<_> = read_lock(&self.data)?
            .values()
            .filter(|p| p.period_id == period_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| a.member.cmp(&b.member).then(a.category.cmp(&b.category)));
        Ok(payments)
    }

    pub fn upsert(&self, payment: Payment) -> Result<(), CasaError> {
        write_lock(&self.data)?.insert(payment.id, payment);
        Ok(())
    }
}
