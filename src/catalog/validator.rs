// ==========================================
// 制造执行系统 - 工序定义校验
// ==========================================
// 校验顺序: 顺序号连续性 → 工序类型 → 工段短码一致性
// 任一失败立即返回 (fail-fast),不产生部分结果
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::domain::{OperationSpec, OperationTemplate, OperationType, ProcessId};
use std::collections::HashMap;

/// 校验顺序号: 排序后必须恰为 1..=n
pub fn validate_sequence(sku: &str, specs: &[OperationSpec]) -> CatalogResult<()> {
    if specs.is_empty() {
        return Err(CatalogError::InvalidSequence {
            sku: sku.to_string(),
            message: "工序列表为空".to_string(),
        });
    }

    let mut sequences: Vec<u32> = specs.iter().map(|s| s.sequence).collect();
    sequences.sort_unstable();

    for (idx, &seq) in sequences.iter().enumerate() {
        let expected = idx as u32 + 1;
        if seq == expected {
            continue;
        }

        let message = if idx > 0 && seq == sequences[idx - 1] {
            format!("顺序号 {} 重复", seq)
        } else {
            format!("缺少顺序号 {} (实际为 {})", expected, seq)
        };
        return Err(CatalogError::InvalidSequence {
            sku: sku.to_string(),
            message,
        });
    }

    Ok(())
}

/// 解析工序类型并按顺序号排列,生成模板列表
pub fn parse_templates(sku: &str, specs: &[OperationSpec]) -> CatalogResult<Vec<OperationTemplate>> {
    let mut templates = specs
        .iter()
        .map(|spec| -> CatalogResult<OperationTemplate> {
            let operation_type = spec.operation_type.parse::<OperationType>().map_err(|e| {
                CatalogError::UnknownOperationType {
                    sku: sku.to_string(),
                    code: spec.code.clone(),
                    value: e.0,
                }
            })?;

            Ok(OperationTemplate {
                template_id: spec.template_id,
                name: spec.name.clone(),
                code: spec.code.clone(),
                operation_type,
                sequence: spec.sequence,
            })
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    templates.sort_by_key(|t| t.sequence);
    Ok(templates)
}

/// 校验工段短码一致性
///
/// 同一工艺路线内,同一短码必须对应同一 template_id + name。
/// `existing` 为该路线下其他产品已安装的 (sku, 模板) 集合。
pub fn validate_codes<'a, I>(
    process_id: ProcessId,
    sku: &str,
    templates: &[OperationTemplate],
    existing: I,
) -> CatalogResult<()>
where
    I: IntoIterator<Item = (&'a str, &'a OperationTemplate)>,
{
    let mut by_code: HashMap<&str, (&str, &OperationTemplate)> = HashMap::new();
    for (owner, template) in existing {
        by_code.entry(template.code.as_str()).or_insert((owner, template));
    }

    for template in templates {
        match by_code.get(template.code.as_str()) {
            Some((owner, known)) if !known.is_same_stage(template.template_id, &template.name) => {
                return Err(CatalogError::DuplicateCodeConflict {
                    process_id,
                    code: template.code.clone(),
                    existing_sku: owner.to_string(),
                    existing_template_id: known.template_id,
                    existing_name: known.name.clone(),
                    sku: sku.to_string(),
                    template_id: template.template_id,
                    name: template.name.clone(),
                });
            }
            Some(_) => {}
            None => {
                by_code.insert(template.code.as_str(), (sku, template));
            }
        }
    }

    Ok(())
}
