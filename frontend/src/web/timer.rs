//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API 提供一次性延时。
//! 非 wasm 目标（本机测试）下延时直接返回，保持测试同步可跑。

/// 等待 `millis` 毫秒
///
/// 封装 `setTimeout` + Promise。用在请求超时竞速和演示数据的
/// 模拟延迟上。
#[cfg(target_arch = "wasm32")]
pub async fn sleep(millis: i32) {
    use wasm_bindgen_futures::JsFuture;

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let window = web_sys::window().expect("无法获取 window 对象");
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            .expect("设置定时器失败");
    });

    // Promise 只会 resolve，不会 reject
    let _ = JsFuture::from(promise).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(_millis: i32) {}
