use catalog_sheets_core::{
    adapters::{
        config::app_config::AppConfig,
        sheets::spreadsheet_manager::SpreadsheetManager,
    },
    application::{
        catalog_layout::CatalogLayoutRoutine, delete_procurement::DeleteProcurementRoutine,
        service::CatalogApplicationService,
    },
    ports::{
        application_service::ApplicationService, routine::Routine,
        spreadsheet_gateway::SpreadsheetGateway,
    },
};
use error_stack::ResultExt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Invalid configuration")]
    Config,
    #[error("Could not connect to the spreadsheet service")]
    Spreadsheet,
}

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    #[instrument(name = "ApplicationServiceFactory::create")]
    pub async fn create() -> error_stack::Result<Arc<dyn ApplicationService>, FactoryError> {
        let config = AppConfig::load().change_context(FactoryError::Config)?;
        let routines = Self::create_routines(config).await?;
        let app_service = CatalogApplicationService::new(routines);
        Ok(Arc::new(app_service))
    }

    async fn create_routines(
        config: AppConfig,
    ) -> error_stack::Result<Vec<Box<dyn Routine>>, FactoryError> {
        if let Some(name) = &config.sheets.spreadsheet_name {
            info!("Target spreadsheet: {}", name);
        }

        let spreadsheet_manager: Arc<dyn SpreadsheetGateway> = Arc::new(
            SpreadsheetManager::new(config.sheets.clone())
                .await
                .change_context(FactoryError::Spreadsheet)?,
        );

        Ok(vec![
            Box::new(DeleteProcurementRoutine::new(
                Arc::clone(&spreadsheet_manager),
                config.catalog.clone(),
            )),
            Box::new(CatalogLayoutRoutine::new(
                Arc::clone(&spreadsheet_manager),
                config.catalog,
            )),
        ])
    }
}

