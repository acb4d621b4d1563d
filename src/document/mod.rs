//! ECU 文档模块
//!
//! 文档的解析、内存表示与写回。

pub mod loader;
pub mod model;

pub use loader::EcuFileSet;
pub use model::{
    Button, DataEntry, Display, DocumentMap, EcuDocument, Input, Label, LayoutDocument, Presend,
    Request, Screen, Send,
};
