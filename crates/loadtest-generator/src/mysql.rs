//! Statement generator for the standard MySQL stress-test table.
//!
//! Every managed table shares one shape covering the common MySQL column
//! families (integers, fixed/floating point, temporal, binary, text):
//!
//! ```text
//! id BIGINT UNSIGNED PK | i INT | ui INT UNSIGNED | de DECIMAL(11,3)
//! fl FLOAT(11,3) | do DOUBLE(25,3) | dt DATETIME(6) | ts TIMESTAMP(6)
//! tbl TINYBLOB | tte TINYTEXT | ch CHAR(5) | va VARCHAR(31) | lva VARCHAR(5000)
//! ```
//!
//! Row ids are drawn from the full positive `BIGINT` range, so fresh inserts
//! practically never collide. Updates and deletes target the first row at or
//! above a random pivot id, which hits an existing row whenever one exists
//! past the pivot.

use crate::generator::{choose_mutation, MutationKind, TableDataGenerator};
use crate::generators::numeric::{
    generate_decimal, generate_int_range, generate_scaled_float, generate_uint_range,
};
use crate::generators::text::{generate_alphanumeric, generate_bytes};
use crate::generators::timestamp::generate_timestamp_range;
use crate::generators::nullable;
use rand::RngCore;
use sync_core::{Statement, UniversalValue};

/// Column names in insert order. `id` must stay first.
pub const COLUMNS: &[&str] = &[
    "id", "i", "ui", "de", "fl", "do", "dt", "ts", "tbl", "tte", "ch", "va", "lva",
];

const MAX_ID: u64 = i64::MAX as u64;
const NULL_RATIO: f64 = 0.1;

// 2000-01-01 .. 2030-01-01 (TIMESTAMP stops at 2038)
const TS_START: i64 = 946_684_800;
const TS_END: i64 = 1_893_456_000;

/// Generate the CREATE TABLE statement for a managed table.
pub fn create_table_ddl(schema: &str, table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (
  `id` BIGINT UNSIGNED NOT NULL,
  `i` INT DEFAULT 0,
  `ui` INT UNSIGNED,
  `de` DECIMAL(11, 3),
  `fl` FLOAT(11, 3) NOT NULL,
  `do` DOUBLE(25, 3),
  `dt` DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
  `ts` TIMESTAMP(6) DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6),
  `tbl` TINYBLOB,
  `tte` TINYTEXT CHARACTER SET utf8mb4,
  `ch` CHAR(5) CHARACTER SET utf8mb4,
  `va` VARCHAR(31) CHARACTER SET utf8mb4,
  `lva` VARCHAR(5000) CHARACTER SET utf8mb4,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
        qualified_name(schema, table)
    )
}

/// Generate DROP TABLE statement.
pub fn drop_table_ddl(schema: &str, table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", qualified_name(schema, table))
}

/// Backtick-quoted `schema`.`table` name.
pub fn qualified_name(schema: &str, table: &str) -> String {
    format!("`{}`.`{}`", escape_ident(schema), escape_ident(table))
}

fn escape_ident(ident: &str) -> String {
    ident.replace('`', "``")
}

/// Generator for one table of the standard shape.
#[derive(Debug, Clone)]
pub struct MySQLTableDataGenerator {
    table: String,
    qualified: String,
}

impl MySQLTableDataGenerator {
    pub fn new(schema: &str, table: &str) -> Self {
        Self {
            table: table.to_string(),
            qualified: qualified_name(schema, table),
        }
    }

    fn column_list() -> String {
        COLUMNS
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn row_placeholders() -> String {
        format!("({})", vec!["?"; COLUMNS.len()].join(", "))
    }

    /// Values for every column except `id`, in [`COLUMNS`] order.
    fn random_values(rng: &mut dyn RngCore) -> Vec<UniversalValue> {
        vec![
            generate_int_range(rng, i32::MIN as i64, i32::MAX as i64),
            nullable(rng, NULL_RATIO, |r| generate_uint_range(r, 0, u32::MAX as u64)),
            nullable(rng, NULL_RATIO, |r| generate_decimal(r, 8, 3)),
            generate_scaled_float(rng, 4, 3),
            nullable(rng, NULL_RATIO, |r| generate_scaled_float(r, 12, 3)),
            generate_timestamp_range(rng, TS_START, TS_END),
            generate_timestamp_range(rng, TS_START, TS_END),
            nullable(rng, NULL_RATIO, |r| generate_bytes(r, 255)),
            nullable(rng, NULL_RATIO, |r| generate_alphanumeric(r, 63)),
            nullable(rng, NULL_RATIO, |r| generate_alphanumeric(r, 5)),
            nullable(rng, NULL_RATIO, |r| generate_alphanumeric(r, 31)),
            nullable(rng, NULL_RATIO, |r| generate_alphanumeric(r, 1024)),
        ]
    }

    fn random_id(rng: &mut dyn RngCore) -> UniversalValue {
        generate_uint_range(rng, 1, MAX_ID)
    }

    fn insert_rows(&self, count: usize, rng: &mut dyn RngCore) -> Statement {
        let placeholders = vec![Self::row_placeholders(); count].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.qualified,
            Self::column_list(),
            placeholders
        );

        let mut args = Vec::with_capacity(count * COLUMNS.len());
        for _ in 0..count {
            args.push(Self::random_id(rng));
            args.extend(Self::random_values(rng));
        }
        Statement::new(sql, args)
    }

    fn delete_one(&self, rng: &mut dyn RngCore) -> Statement {
        Statement::new(
            format!(
                "DELETE FROM {} WHERE `id` >= ? ORDER BY `id` LIMIT 1",
                self.qualified
            ),
            vec![Self::random_id(rng)],
        )
    }

    fn update_one(&self, rng: &mut dyn RngCore) -> Statement {
        let assignments = COLUMNS[1..]
            .iter()
            .map(|c| format!("`{c}` = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE `id` >= ? ORDER BY `id` LIMIT 1",
            self.qualified, assignments
        );

        let mut args = Self::random_values(rng);
        args.push(Self::random_id(rng));
        Statement::new(sql, args)
    }
}

impl TableDataGenerator for MySQLTableDataGenerator {
    fn table(&self) -> &str {
        &self.table
    }

    fn bulk_insert(&self, count: usize, rng: &mut dyn RngCore) -> Statement {
        debug_assert!(count > 0, "bulk insert of zero rows");
        self.insert_rows(count, rng)
    }

    fn random_mutation(
        &self,
        delete_ratio: f64,
        insert_ratio: f64,
        rng: &mut dyn RngCore,
    ) -> Statement {
        match choose_mutation(delete_ratio, insert_ratio, rng) {
            MutationKind::Delete => self.delete_one(rng),
            MutationKind::Insert => self.insert_rows(1, rng),
            MutationKind::Update => self.update_one(rng),
        }
    }
}
