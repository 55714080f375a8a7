pub mod audit;
pub mod criteria;
pub mod decision;
pub mod dispatch;
pub mod evaluation;
pub mod init;
pub mod note;
pub mod option;
pub mod shared;
