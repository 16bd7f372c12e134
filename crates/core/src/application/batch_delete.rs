use tracing::{error, info, instrument};

use crate::domain::catalog::delete_plan::DeletePlan;
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, WorksheetInfo};

/// Removes every planned row of one worksheet in a single batch update and
/// returns how many rows went away. An empty plan makes no call; a rejected
/// batch is logged and counts as zero.
#[instrument(skip(gateway, plan), fields(sheet = %worksheet.title, rows = plan.len()))]
pub async fn delete_rows(
    gateway: &dyn SpreadsheetGateway,
    worksheet: &WorksheetInfo,
    plan: &DeletePlan,
) -> usize {
    if plan.is_empty() {
        return 0;
    }

    match gateway
        .batch_update(plan.to_requests(worksheet.sheet_id))
        .await
    {
        Ok(()) => {
            info!("Deleted {} row(s) from '{}'", plan.len(), worksheet.title);
            plan.len()
        }
        Err(report) => {
            error!("Failed to delete rows from '{}': {:?}", worksheet.title, report);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSpreadsheet;

    fn worksheet() -> WorksheetInfo {
        WorksheetInfo {
            sheet_id: 11,
            title: "001.Agama".into(),
            row_count: 100,
        }
    }

    #[tokio::test]
    async fn test_empty_plan_makes_no_call() {
        let fake = FakeSpreadsheet::new("Katalog");
        let deleted = delete_rows(&fake, &worksheet(), &DeletePlan::default()).await;
        assert_eq!(deleted, 0);
        assert!(fake.batch_updates().is_empty());
    }

    #[tokio::test]
    async fn test_single_batch_in_descending_order() {
        let fake = FakeSpreadsheet::new("Katalog");
        let deleted = delete_rows(&fake, &worksheet(), &DeletePlan::new([12, 20, 15])).await;
        assert_eq!(deleted, 3);

        let batches = fake.batch_updates();
        assert_eq!(batches.len(), 1);
        let ranges: Vec<(Option<i32>, Option<i32>, Option<i32>)> = batches[0]
            .iter()
            .map(|request| {
                let range = request
                    .delete_dimension
                    .as_ref()
                    .and_then(|delete| delete.range.as_ref())
                    .unwrap();
                (range.sheet_id, range.start_index, range.end_index)
            })
            .collect();
        assert_eq!(
            ranges,
            vec![
                (Some(11), Some(19), Some(20)),
                (Some(11), Some(14), Some(15)),
                (Some(11), Some(11), Some(12)),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_batch_counts_zero() {
        let fake = FakeSpreadsheet::new("Katalog").failing_batch_updates(1);
        let deleted = delete_rows(&fake, &worksheet(), &DeletePlan::new([12])).await;
        assert_eq!(deleted, 0);
    }
}
