use crate::domain::payment::{OrderId, PaymentId, PaymentOrder, PaymentRecord, PaymentStatus};
use crate::domain::ports::PaymentRepository;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, WriteBatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the order snapshot and QR code, written once.
pub const CF_PAYMENT_ORDERS: &str = "payment_orders";
/// Column Family holding the mutable status and gateway payment id.
pub const CF_PAYMENT_STATUS: &str = "payment_status";

#[derive(Debug, Serialize, Deserialize)]
struct StoredOrder {
    order: PaymentOrder,
    qr_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredStatus {
    status: PaymentStatus,
    payment_id: Option<PaymentId>,
}

/// A persistent payment repository backed by RocksDB.
///
/// The immutable part of a payment order and its status live in separate
/// Column Families, so a confirmation rewrites only the small status entry.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbPaymentRepository {
    db: Arc<DB>,
}

impl RocksDbPaymentRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_PAYMENT_ORDERS, Options::default());
        let cf_status = ColumnFamilyDescriptor::new(CF_PAYMENT_STATUS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_status])
            .map_err(storage_error)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Reassembles the full record from both column families.
    pub async fn get(&self, order_id: OrderId) -> Result<Option<PaymentRecord>> {
        let key = order_id.to_be_bytes();
        let Some(order_bytes) = self
            .db
            .get_cf(self.cf(CF_PAYMENT_ORDERS)?, key)
            .map_err(storage_error)?
        else {
            return Ok(None);
        };
        let stored: StoredOrder = decode(&order_bytes)?;
        let status = self.read_status(order_id)?.unwrap_or(StoredStatus {
            status: PaymentStatus::Pending,
            payment_id: None,
        });

        Ok(Some(PaymentRecord {
            order: stored.order,
            qr_code: stored.qr_code,
            status: status.status,
            payment_id: status.payment_id,
        }))
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| PaymentError::Storage(format!("{name} column family not found")))
    }

    fn read_status(&self, order_id: OrderId) -> Result<Option<StoredStatus>> {
        let bytes = self
            .db
            .get_cf(self.cf(CF_PAYMENT_STATUS)?, order_id.to_be_bytes())
            .map_err(storage_error)?;
        bytes.map(|bytes| decode(&bytes)).transpose()
    }
}

#[async_trait]
impl PaymentRepository for RocksDbPaymentRepository {
    async fn save_payment_order(&self, order: &PaymentOrder, qr_code: &str) -> Result<()> {
        let key = order.order_id.to_be_bytes();
        if let Some(current) = self.read_status(order.order_id)? {
            current.status.ensure_transition(PaymentStatus::Pending)?;
        }

        let order_value = encode(&StoredOrder {
            order: order.clone(),
            qr_code: qr_code.to_string(),
        })?;
        let status_value = encode(&StoredStatus {
            status: PaymentStatus::Pending,
            payment_id: None,
        })?;

        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_PAYMENT_ORDERS)?, key, order_value);
        batch.put_cf(self.cf(CF_PAYMENT_STATUS)?, key, status_value);
        self.db.write(batch).map_err(storage_error)
    }

    async fn update_payment_order_status(
        &self,
        order_id: OrderId,
        payment_id: PaymentId,
        status: PaymentStatus,
    ) -> Result<()> {
        let key = order_id.to_be_bytes();
        // Existence check without loading the order snapshot
        let exists = self
            .db
            .get_pinned_cf(self.cf(CF_PAYMENT_ORDERS)?, key)
            .map_err(storage_error)?
            .is_some();
        if !exists {
            return Err(PaymentError::NotFound(order_id));
        }

        if let Some(current) = self.read_status(order_id)? {
            current.status.ensure_transition(status)?;
        }

        let value = encode(&StoredStatus {
            status,
            payment_id: Some(payment_id),
        })?;
        self.db
            .put_cf(self.cf(CF_PAYMENT_STATUS)?, key, value)
            .map_err(storage_error)
    }
}

fn storage_error(e: rocksdb::Error) -> PaymentError {
    PaymentError::Storage(e.to_string())
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| PaymentError::Storage(format!("Serialization error: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| PaymentError::Storage(format!("Deserialization error: {e}")))
}
