use issues_config::Config;
use issues_database_interface::DbService;

use crate::CoreModule;

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
}
