//! Static UI string tables, one per language.

use super::Language;

/// Every user-visible UI string for one language.
pub struct Texts {
    pub app_title: &'static str,
    pub locate: &'static str,
    pub use_my_location: &'static str,
    pub route_title: &'static str,
    pub start_placeholder: &'static str,
    pub end_placeholder: &'static str,
    pub stop_placeholder: &'static str,
    pub search_placeholder: &'static str,
    pub search_places: &'static str,
    pub calc_route: &'static str,
    pub clear_route: &'static str,
    pub add_stop: &'static str,
    pub attractions: &'static str,
    pub route_info: &'static str,
    pub instructions: &'static str,
    pub instructions_list: &'static [&'static str],
    pub distance: &'static str,
    pub time: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub km: &'static str,
    pub min: &'static str,
    pub your_location: &'static str,
    pub my_location: &'static str,
    pub map_point: &'static str,
    pub set_as_start: &'static str,
    pub set_as_end: &'static str,
    pub add_as_stop: &'static str,
    pub start_short: &'static str,
    pub end_short: &'static str,
    pub routing: &'static str,
    pub travel_mode: &'static str,
    pub driving: &'static str,
    pub walking: &'static str,
    pub auto_route: &'static str,
    pub share_link: &'static str,
    pub copied: &'static str,
    pub dismiss: &'static str,
    pub ready: &'static str,
    pub no_results: &'static str,
    pub error_prefix: &'static str,
    pub geolocation_unsupported: &'static str,
    pub geolocation_failed: &'static str,
    pub geolocation_denied: &'static str,
    pub geolocation_unavailable: &'static str,
    pub geolocation_timeout: &'static str,
    pub geolocation_unknown: &'static str,
    pub need_two_points: &'static str,
    pub route_failed: &'static str,
    pub search_failed: &'static str,
    pub malformed_place: &'static str,
}

static ZH: Texts = Texts {
    app_title: "城市路线规划",
    locate: "📍 定位我的位置",
    use_my_location: "以我的位置为起点",
    route_title: "路线规划",
    start_placeholder: "起点（地址或点击地图）",
    end_placeholder: "终点（地址或点击地图）",
    stop_placeholder: "途经点",
    search_placeholder: "搜索地点",
    search_places: "搜索地址",
    calc_route: "规划路线",
    clear_route: "清除路线",
    add_stop: "添加途经点",
    attractions: "热门景点",
    route_info: "路线信息",
    instructions: "使用说明",
    instructions_list: &[
        "点击地图上的任意位置添加路线点",
        "使用景点旁的按钮快速设置路线",
        "点击\"定位我的位置\"在地图上显示您当前的位置",
        "使用搜索框快速查找景点",
    ],
    distance: "距离",
    time: "预计时间",
    from: "起点",
    to: "终点",
    km: "公里",
    min: "分钟",
    your_location: "您的位置",
    my_location: "我的位置",
    map_point: "地图位置",
    set_as_start: "设为起点",
    set_as_end: "设为终点",
    add_as_stop: "添加为途经点",
    start_short: "起点",
    end_short: "终点",
    routing: "正在规划路线…",
    travel_mode: "出行方式",
    driving: "驾车",
    walking: "步行",
    auto_route: "自动更新路线",
    share_link: "复制分享链接",
    copied: "链接已复制",
    dismiss: "关闭",
    ready: "就绪",
    no_results: "未找到结果",
    error_prefix: "错误",
    geolocation_unsupported: "您的浏览器不支持地理定位功能",
    geolocation_failed: "无法获取您的位置：",
    geolocation_denied: "您拒绝了位置访问权限",
    geolocation_unavailable: "位置信息不可用",
    geolocation_timeout: "获取位置信息超时",
    geolocation_unknown: "发生未知错误",
    need_two_points: "请设置起点和终点",
    route_failed: "无法规划路线",
    search_failed: "搜索失败",
    malformed_place: "链接中的地点无效，已跳过",
};

static RU: Texts = Texts {
    app_title: "Маршруты по городу",
    locate: "📍 Определить мое местоположение",
    use_my_location: "Начать от моего местоположения",
    route_title: "Построение маршрута",
    start_placeholder: "Откуда (адрес или клик на карте)",
    end_placeholder: "Куда (адрес или клик на карте)",
    stop_placeholder: "Промежуточная точка",
    search_placeholder: "Поиск мест",
    search_places: "Найти адрес",
    calc_route: "Построить маршрут",
    clear_route: "Очистить маршрут",
    add_stop: "Добавить точку",
    attractions: "Достопримечательности",
    route_info: "Информация о маршруте",
    instructions: "Инструкция",
    instructions_list: &[
        "Нажмите на любое место на карте, чтобы добавить точку маршрута",
        "Используйте кнопки рядом с достопримечательностями для быстрой установки маршрута",
        "Нажмите \"Определить мое местоположение\", чтобы показать ваше текущее местоположение на карте",
        "Используйте поле поиска для быстрого поиска достопримечательностей",
    ],
    distance: "Расстояние",
    time: "Примерное время",
    from: "От",
    to: "До",
    km: "км",
    min: "минут",
    your_location: "Ваше местоположение",
    my_location: "Мое местоположение",
    map_point: "Точка на карте",
    set_as_start: "Отсюда",
    set_as_end: "Сюда",
    add_as_stop: "Через",
    start_short: "A",
    end_short: "B",
    routing: "Строим маршрут…",
    travel_mode: "Способ передвижения",
    driving: "На машине",
    walking: "Пешком",
    auto_route: "Обновлять маршрут автоматически",
    share_link: "Скопировать ссылку",
    copied: "Ссылка скопирована",
    dismiss: "Закрыть",
    ready: "Готово",
    no_results: "Ничего не найдено",
    error_prefix: "Ошибка",
    geolocation_unsupported: "Ваш браузер не поддерживает геолокацию",
    geolocation_failed: "Не удалось определить местоположение: ",
    geolocation_denied: "Пользователь отказал в доступе к геолокации",
    geolocation_unavailable: "Информация о местоположении недоступна",
    geolocation_timeout: "Время ожидания истекло",
    geolocation_unknown: "Неизвестная ошибка",
    need_two_points: "Пожалуйста, установите точки отправления и назначения",
    route_failed: "Не удалось построить маршрут",
    search_failed: "Ошибка поиска",
    malformed_place: "Некорректная точка в ссылке пропущена",
};

/// String table for `lang`.
pub fn texts(lang: Language) -> &'static Texts {
    match lang {
        Language::Zh => &ZH,
        Language::Ru => &RU,
    }
}
