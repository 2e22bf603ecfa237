//! Static place-name vocabulary for the suggestion engine.
//!
//! Ordered roughly by population; the suggestion ranking preserves this order
//! inside each match tier, so more likely cities surface first.

pub const RUSSIAN_CITIES: &[&str] = &[
    "Москва",
    "Санкт-Петербург",
    "Новосибирск",
    "Екатеринбург",
    "Казань",
    "Нижний Новгород",
    "Челябинск",
    "Красноярск",
    "Самара",
    "Уфа",
    "Ростов-на-Дону",
    "Краснодар",
    "Омск",
    "Воронеж",
    "Пермь",
    "Волгоград",
    "Саратов",
    "Тюмень",
    "Тольятти",
    "Барнаул",
    "Ижевск",
    "Махачкала",
    "Хабаровск",
    "Ульяновск",
    "Иркутск",
    "Владивосток",
    "Ярославль",
    "Кемерово",
    "Томск",
    "Набережные Челны",
    "Ставрополь",
    "Оренбург",
    "Новокузнецк",
    "Рязань",
    "Балашиха",
    "Пенза",
    "Чебоксары",
    "Липецк",
    "Калининград",
    "Астрахань",
    "Тула",
    "Киров",
    "Сочи",
    "Курск",
    "Улан-Удэ",
    "Тверь",
    "Магнитогорск",
    "Сургут",
    "Брянск",
    "Иваново",
    "Якутск",
    "Владимир",
    "Белгород",
    "Калуга",
    "Чита",
    "Смоленск",
    "Волжский",
    "Архангельск",
    "Вологда",
    "Мурманск",
    "Петрозаводск",
    "Псков",
    "Великий Новгород",
    "Йошкар-Ола",
    "Таганрог",
    "Грозный",
    "Нижний Тагил",
    "Стерлитамак",
    "Кострома",
    "Курган",
    "Орёл",
    "Тамбов",
];
