//! Builtin category table and segmentation lexicon.
//!
//! Declaration order below is the canonical iteration order; it decides ties
//! between equally scored categories. Keywords are already in normalized form.

use super::CategoryDefinition;

pub(crate) const BUILTIN_FALLBACK: &str = "other";

type Entry = (&'static str, &'static str, &'static [&'static str]);

const BUILTIN_CATEGORIES: &[Entry] = &[
    (
        "food",
        "餐饮",
        &[
            "餐", "饭", "吃", "早餐", "午餐", "晚餐", "早饭", "午饭", "晚饭", "吃饭", "夜宵", "宵夜", "外卖", "食堂",
            "餐厅", "饭店", "火锅", "烧烤", "小吃", "咖啡", "奶茶", "饮料", "零食", "水果", "面包", "蛋糕", "买菜",
            "菜", "肯德基", "麦当劳", "星巴克", "starbucks", "kfc", "mcdonald",
        ],
    ),
    (
        "transport",
        "交通",
        &[
            "打车", "出租车", "的士", "滴滴", "网约车", "地铁", "公交", "公交车", "巴士", "火车", "高铁", "动车",
            "机票", "飞机", "机场", "车票", "加油", "油费", "停车", "停车费", "过路费", "共享单车", "车", "taxi",
            "uber",
        ],
    ),
    (
        "shopping",
        "购物",
        &[
            "购物", "买", "超市", "商场", "便利店", "淘宝", "京东", "拼多多", "网购", "衣服", "鞋", "包", "化妆品",
            "日用品", "电器", "手机", "shopping",
        ],
    ),
    (
        "entertainment",
        "娱乐",
        &[
            "电影", "看电影", "电影院", "电影票", "游戏", "唱歌", "ktv", "演唱会", "门票", "旅游", "景点", "健身",
            "酒吧", "娱乐", "会员", "视频",
        ],
    ),
    (
        "healthcare",
        "医疗",
        &["医院", "看病", "挂号", "药", "药店", "买药", "体检", "牙医", "诊所", "医疗", "医药费", "门诊", "感冒"],
    ),
    (
        "education",
        "教育",
        &["学费", "书", "买书", "课程", "培训", "教材", "文具", "考试", "辅导", "补习", "网课", "学习"],
    ),
    (
        "utilities",
        "生活缴费",
        &[
            "水费", "电费", "燃气", "燃气费", "话费", "手机费", "房租", "物业", "物业费", "宽带", "充值", "缴费",
            "网费",
        ],
    ),
    ("other", "其他", &["其他", "杂费", "红包", "转账"]),
];

/// Extra segmentation vocabulary that belongs to no category: time words and
/// connectives that commonly frame an expense utterance.
pub(crate) const COMMON_WORDS: &[&str] = &[
    "今天", "昨天", "前天", "明天", "早上", "上午", "中午", "下午", "晚上", "刚才", "刚刚", "一共", "总共", "大概",
    "一个", "一杯", "一份", "还有", "然后",
];

pub(crate) fn builtin_definitions() -> Vec<CategoryDefinition> {
    BUILTIN_CATEGORIES
        .iter()
        .map(|(id, name, keywords)| CategoryDefinition {
            id: id.to_string(),
            name: Some(name.to_string()),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}
