// Deckmoor 卡牌搜索后端
//
// 将前端的结构化筛选条件翻译为 Scryfall 查询串，并把上游的大页结果
// 重新切分为固定大小的小页：
// - API 路由
// - 配置
// - Scryfall 客户端
// - 查询翻译与分页

pub mod api;
pub mod config;
pub mod external;
pub mod models;
pub mod services;
