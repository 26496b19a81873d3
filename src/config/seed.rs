// ==========================================
// 制造执行系统 - 内置种子数据
// ==========================================
// 演示钢厂: 热轧 / 冷轧 / 棒材 / 连铸坯 四条工艺路线
// 炼钢工段 (废钢装料 → 电炉冶炼 → 钢包精炼) 在多个产品间共享
// ==========================================

use crate::config::catalog_config::{CatalogConfig, ProcessConfig, ProductConfig};
use crate::domain::{Customer, OperationSpec, ProcessId};

pub const HOT_ROLLING: ProcessId = 1;
pub const COLD_ROLLING: ProcessId = 2;
pub const BAR_ROLLING: ProcessId = 3;
pub const BILLET_CASTING: ProcessId = 4;

// (template_id, name, code, type)
type Stage = (u32, &'static str, &'static str, &'static str);

const SCRAP_CHARGING: Stage = (1, "Scrap Charging", "SCR", "FURNACE");
const EAF_MELTING: Stage = (2, "EAF Melting", "EAF", "FURNACE");
const LADLE_REFINING: Stage = (3, "Ladle Refining", "LF", "FURNACE");
const SLAB_CASTING: Stage = (4, "Continuous Slab Casting", "CC", "CASTER");
const BILLET_CASTER: Stage = (5, "Billet Casting", "BCC", "CASTER");
const REHEATING: Stage = (6, "Reheating Furnace", "RHF", "FURNACE");
const ROUGHING: Stage = (7, "Roughing Mill", "RM", "ROLLING");
const FINISHING: Stage = (8, "Finishing Mill", "FM", "ROLLING");
const LAMINAR_COOLING: Stage = (9, "Laminar Cooling", "LC", "COOLING");
const PICKLING_LINE: Stage = (11, "Pickling Line", "PKL", "PICKLING");
const COLD_MILL: Stage = (12, "Cold Rolling Mill", "CRM", "ROLLING");
const BATCH_ANNEALING: Stage = (13, "Batch Annealing", "BAF", "HEAT_TREATMENT");
const TEMPER_ROLLING: Stage = (14, "Temper Rolling", "SPM", "ROLLING");
const BAR_MILL: Stage = (15, "Bar Rolling Mill", "BRM", "ROLLING");
const QUENCH_TEMPER: Stage = (16, "Quenching and Self-Tempering", "QST", "HEAT_TREATMENT");
const COOLING_BED: Stage = (17, "Cooling Bed", "CB", "COOLING");
const BILLET_COOLING: Stage = (18, "Billet Cooling", "BCL", "COOLING");

/// 炼钢工段
const MELT_SHOP: [Stage; 3] = [SCRAP_CHARGING, EAF_MELTING, LADLE_REFINING];

fn route(stages: &[Stage]) -> Vec<OperationSpec> {
    stages
        .iter()
        .enumerate()
        .map(|(idx, &(template_id, name, code, kind))| {
            OperationSpec::new(template_id, name, code, kind, idx as u32 + 1)
        })
        .collect()
}

fn product(sku: &str, name: &str, process_id: ProcessId, stages: &[Stage]) -> ProductConfig {
    ProductConfig {
        sku: sku.to_string(),
        name: name.to_string(),
        process_id,
        operations: route(stages),
    }
}

fn process(process_id: ProcessId, name: &str) -> ProcessConfig {
    ProcessConfig {
        process_id,
        name: name.to_string(),
    }
}

/// 默认目录配置
///
/// 热轧卷与螺纹钢分属不同工艺路线,短码一致性只在路线内校验;
/// 全部工段共用一张短码表 (见 `test_stage_table_consistent_across_one_route`)
pub fn default_config() -> CatalogConfig {
    let hot_strip: Vec<Stage> = MELT_SHOP
        .iter()
        .copied()
        .chain([SLAB_CASTING, REHEATING, ROUGHING, FINISHING, LAMINAR_COOLING])
        .collect();
    let bar: Vec<Stage> = MELT_SHOP
        .iter()
        .copied()
        .chain([BILLET_CASTER, REHEATING, BAR_MILL, QUENCH_TEMPER, COOLING_BED])
        .collect();
    let billet: Vec<Stage> = MELT_SHOP
        .iter()
        .copied()
        .chain([BILLET_CASTER, BILLET_COOLING])
        .collect();
    let cold_strip = [PICKLING_LINE, COLD_MILL, BATCH_ANNEALING, TEMPER_ROLLING];

    CatalogConfig {
        processes: vec![
            process(HOT_ROLLING, "Hot Rolling"),
            process(COLD_ROLLING, "Cold Rolling"),
            process(BAR_ROLLING, "Bar Rolling"),
            process(BILLET_CASTING, "Billet Casting"),
        ],
        products: vec![
            product("HR-COIL-2MM", "Hot Rolled Coil 2mm", HOT_ROLLING, &hot_strip),
            product("HR-COIL-3MM", "Hot Rolled Coil 3mm", HOT_ROLLING, &hot_strip),
            product("CR-SHEET-1MM", "Cold Rolled Sheet 1mm", COLD_ROLLING, &cold_strip),
            product("REBAR-10MM", "Rebar 10mm", BAR_ROLLING, &bar),
            product("REBAR-12MM", "Rebar 12mm", BAR_ROLLING, &bar),
            product("BILLET-150", "Square Billet 150mm", BILLET_CASTING, &billet),
        ],
        customers: vec![
            Customer::new("CUST-001", "Northern Auto Parts"),
            Customer::new("CUST-002", "Harbor Shipbuilding"),
            Customer::new("CUST-003", "Metro Construction Group"),
            Customer::new("CUST-004", "Delta Appliance Works"),
            Customer::new("CUST-005", "Ridge Pipe & Tube"),
            Customer::new("CUST-006", "Summit Steel Service Center"),
        ],
    }
}
