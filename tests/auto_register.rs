//! 首次使用全局总线时自动注册默认处理器
//!
//! 独立的测试二进制：进程内没有其他测试触碰全局总线。

use logga::{get_diagnostics, get_logger, handlers};

#[test]
fn first_event_is_rendered_without_setup() {
    // 首次访问即完成种子注册，此前无任何 add_handler / reset
    assert_eq!(handlers().len(), 1);

    let before = get_diagnostics();
    get_logger("tests:auto-register").info("rendered by the seeded default handler");
    let after = get_diagnostics();

    assert_eq!(after.events_published, before.events_published + 1);
    assert_eq!(after.lines_rendered, before.lines_rendered + 1);
    assert_eq!(handlers().len(), 1);
}
