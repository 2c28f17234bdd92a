use moviedash_core::Route;

use super::super::{App, AppMessage};

impl App {
    // — 认证 —

    /// 提交登录表单：清除旧错误，异步请求，结果回到主循环
    pub(crate) fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        self.login.begin_submit();

        let username = self.login.username.clone();
        let password = self.login.password.clone();
        let page = self.page;
        let tx = self.msg_tx.clone();
        let controller = self.controller.clone();

        tokio::spawn(async move {
            let result = controller.login(&username, &password).await;
            let _ = tx.send(AppMessage::LoginResult { page, result });
        });
    }

    pub(crate) fn on_login_result(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.navigate(Route::Dashboard),
            Err(message) => self.login.fail(message),
        }
    }

    /// 鉴权守卫：失败则跳转登录，成功后才开始拉取和定时刷新
    pub(crate) fn init_dashboard(&mut self) {
        self.checking_auth = true;

        let page = self.page;
        let tx = self.msg_tx.clone();
        let controller = self.controller.clone();

        tokio::spawn(async move {
            let ok = controller.check_auth().await;
            let _ = tx.send(AppMessage::AuthChecked { page, ok });
        });
    }

    pub(crate) fn on_auth_checked(&mut self, ok: bool) {
        self.checking_auth = false;
        if !ok {
            self.navigate(Route::Login);
            return;
        }
        self.start_fetch();
        self.start_refresh_timer();
    }

    /// 登出：尽力通知后端，然后无条件清除 token 并跳转登录
    pub(crate) fn logout(&mut self) {
        if self.logging_out {
            return;
        }
        self.logging_out = true;

        let page = self.page;
        let tx = self.msg_tx.clone();
        let controller = self.controller.clone();

        tokio::spawn(async move {
            controller.logout().await;
            let _ = tx.send(AppMessage::LoggedOut { page });
        });
    }
}
