// ==========================================
// 制造执行系统 - 目录种子数据仓储
// ==========================================
// 职责: process / product / operation_template / customer 表的整体读写
// 红线: Repository 不含校验逻辑,校验在目录构建时进行
// ==========================================

use crate::config::{CatalogConfig, ProcessConfig, ProductConfig};
use crate::db::{
    init_catalog_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION,
};
use crate::domain::{Customer, OperationSpec};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CatalogRepository - 目录种子仓储
// ==========================================
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    /// 打开数据库并建表
    ///
    /// 已有库的 schema_version 与当前代码不一致时只告警,不阻断
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        if let Some(version) = read_schema_version(&conn)? {
            if version != CURRENT_SCHEMA_VERSION {
                tracing::warn!(
                    db_path,
                    found = version,
                    expected = CURRENT_SCHEMA_VERSION,
                    "目录库 schema_version 不匹配"
                );
            }
        }
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.init_schema()?;
        Ok(repo)
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn init_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        init_catalog_schema(&conn)?;
        Ok(())
    }

    /// 整体替换目录种子数据 (单事务)
    pub fn save_config(&self, config: &CatalogConfig) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute_batch(
            "DELETE FROM operation_template; DELETE FROM product; DELETE FROM process; DELETE FROM customer;",
        )?;

        for process in &config.processes {
            tx.execute(
                "INSERT INTO process (process_id, name) VALUES (?1, ?2)",
                params![process.process_id, process.name],
            )?;
        }

        for product in &config.products {
            tx.execute(
                "INSERT INTO product (sku, name, process_id) VALUES (?1, ?2, ?3)",
                params![product.sku, product.name, product.process_id],
            )?;
            for op in &product.operations {
                tx.execute(
                    r#"
                    INSERT INTO operation_template (sku, sequence, template_id, name, code, operation_type)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    params![
                        product.sku,
                        op.sequence,
                        op.template_id,
                        op.name,
                        op.code,
                        op.operation_type
                    ],
                )?;
            }
        }

        for customer in &config.customers {
            tx.execute(
                "INSERT INTO customer (code, name) VALUES (?1, ?2)",
                params![customer.code, customer.name],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!(
            processes = config.processes.len(),
            products = config.products.len(),
            "目录种子数据已保存"
        );
        Ok(())
    }

    /// 读取目录种子数据
    ///
    /// 工序按 sequence 排序,产品按 SKU 排序
    pub fn load_config(&self) -> RepositoryResult<CatalogConfig> {
        let conn = self.get_conn()?;

        let processes = {
            let mut stmt = conn.prepare("SELECT process_id, name FROM process ORDER BY process_id")?;
            let rows = stmt.query_map([], |row| {
                Ok(ProcessConfig {
                    process_id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut operations: HashMap<String, Vec<OperationSpec>> = HashMap::new();
        {
            let mut stmt = conn.prepare(
                r#"
                SELECT sku, template_id, name, code, operation_type, sequence
                FROM operation_template
                ORDER BY sku, sequence
                "#,
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    OperationSpec {
                        template_id: row.get(1)?,
                        name: row.get(2)?,
                        code: row.get(3)?,
                        operation_type: row.get(4)?,
                        sequence: row.get(5)?,
                    },
                ))
            })?;
            for row in rows {
                let (sku, spec) = row?;
                operations.entry(sku).or_default().push(spec);
            }
        }

        let products = {
            let mut stmt = conn.prepare("SELECT sku, name, process_id FROM product ORDER BY sku")?;
            let rows = stmt.query_map([], |row| {
                Ok(ProductConfig {
                    sku: row.get(0)?,
                    name: row.get(1)?,
                    process_id: row.get(2)?,
                    operations: Vec::new(),
                })
            })?;
            let mut products = rows.collect::<Result<Vec<_>, _>>()?;
            for product in &mut products {
                product.operations = operations.remove(&product.sku).unwrap_or_default();
            }
            products
        };

        let customers = {
            let mut stmt = conn.prepare("SELECT code, name FROM customer ORDER BY code")?;
            let rows = stmt.query_map([], |row| Ok(Customer::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        Ok(CatalogConfig {
            processes,
            products,
            customers,
        })
    }
}
