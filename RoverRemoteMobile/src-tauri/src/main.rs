// 除非在调试模式下，否则在 Windows 发布版本中阻止打开额外的控制台窗口。
// 请勿移除此行!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    app_lib::run()
}
