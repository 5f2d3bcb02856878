//! Static prompt corpus
//!
//! Holds the odai-writing techniques, category and difficulty
//! instructions, and per-provider style hints assembled by the builder.
//! The text is Japanese because the generated odai are Japanese.

use crate::models::{Category, Difficulty, ProviderId};

/// One odai-writing technique presented to the model
#[derive(Debug, Clone, Copy)]
pub struct Technique {
    /// Short technique name
    pub name: &'static str,
    /// What the technique does
    pub description: &'static str,
    /// Worked example, when one exists
    pub example: Option<&'static str>,
}

/// Technique pool the builder samples from
pub const TECHNIQUES: &[Technique] = &[
    Technique {
        name: "微妙ランキング",
        description: "ランキングの上位ではなく「下位」に該当する条件を問うパターン。「ありそうだけど、少ない回答」を想像させる。",
        example: Some("医者にアンケート。「医者人生の中で一度は言ってみたいセリフ」第87位は？"),
    },
    Technique {
        name: "オクシモロン",
        description: "意味が矛盾する言葉を並べる手法。固定観念に相反する形容詞で二項対立の先にある発想を誘発。",
        example: Some("危険だけど居心地が良いカフェとは？"),
    },
    Technique {
        name: "既存物語の拡張",
        description: "童話や映画など既存のストーリーの続きや発展的な設定について問う。",
        example: Some("13日の金曜日に暴れ回るジェイソン。14日の土曜日は何をしてる？"),
    },
    Technique {
        name: "プラスワン",
        description: "既存のラインナップに+1を加える問い。",
        example: Some("相撲の決まり手が1つ増えて八十三手になりました。何ですか？"),
    },
    Technique {
        name: "不要機能",
        description: "常識的に考えて「必要のない」機能について想像させる。",
        example: Some("最新型洗濯機。「この機能いる？」どんな機能？"),
    },
    Technique {
        name: "境界ギリギリ",
        description: "AとBのカテゴリの境界、価値の曖昧な領域について問う。",
        example: Some("格安航空会社。「そこまでするなら格安じゃなくていいよ！」どんなの？"),
    },
    Technique {
        name: "極端化",
        description: "ある価値や意味を極端に誇張する文脈を設定。",
        example: Some("もったいないオバケが怒り狂ったもったいない事とは？"),
    },
    Technique {
        name: "有名人リアクション",
        description: "具体的な有名人のリアクションを設定し、その原因について想像させる。",
        example: None,
    },
    Technique {
        name: "何が起きる？",
        description: "普段はやらないアクションをとった際に「何が起こるか？」と想像させる。",
        example: Some("バスの降車ボタン7回連打すると何が起きる？"),
    },
];

/// Opening section, up to where the technique blocks are inserted
pub const PROMPT_INTRO: &str = "
あなたは大喜利のお題を作る専門家です。
以下の条件に従って、面白くて創造的なお題を生成してください。

## 良いお題を作るコツ（以下のテクニックを参考にしてください）

";

/// Requirements and output-format section, inserted after the technique blocks
pub const PROMPT_REQUIREMENTS: &str = "

## 要求事項:
1. 各お題は独立していて、重複しないこと
2. 回答者の創造性を刺激するような内容
3. 適度な制約がありつつも、幅広い回答が可能
4. 日本語として自然で理解しやすい
5. 不適切な内容を含まない
6. 大喜利らしいユーモアと発想の余地がある
7. 上記のテクニックのいずれかを活用したお題にする
8. ありきたりなパターンは避け、意外性のある切り口を重視する

出力形式:
お題のみを改行区切りで出力してください。番号や説明は不要です。
";

const STYLE_OPENAI: &str = "
あなたの強みを活かし、以下の点を意識してお題を作成してください：
- 論理的な構造や意外性のある状況設定を活かしたお題
- シュールで不条理な面白さがあるお題
- 具体的な数字や条件を使った、思わず考え込むお題
";

const STYLE_CLAUDE: &str = "
あなたの強みを活かし、以下の点を意識してお題を作成してください：
- 言葉の響きや韻を活かした、語感の良いお題
- 人間の機微や心理の隙をつくお題
- 比喩や擬人法を使った、情景が浮かぶお題
";

const STYLE_GEMINI: &str = "
あなたの強みを活かし、以下の点を意識してお題を作成してください：
- テンポが良く、口に出して読みたくなるお題
- 身近なあるあるネタを新鮮な角度で切り取ったお題
- ポップで親しみやすく、誰でもすぐ答えたくなるお題
";

/// Style hint tuned to each provider's strengths
pub fn style_hint(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::OpenAi => STYLE_OPENAI,
        ProviderId::Claude => STYLE_CLAUDE,
        ProviderId::Gemini => STYLE_GEMINI,
    }
}

/// Instruction paragraph for a category
pub fn category_prompt(category: Category) -> &'static str {
    match category {
        Category::Daily => "日常生活の何気ない場面や出来事を題材にした大喜利のお題を作成してください。家事、通勤、買い物、食事など、誰もが経験する日常的な状況を面白く捉えたお題にしてください。",
        Category::Situation => "特定のシチュエーションや状況設定を明確にした大喜利のお題を作成してください。「〜な時」「〜な場面で」といった具体的な場面設定があるお題にしてください。",
        Category::Wordplay => "言葉遊びを活用した大喜利のお題を作成してください。ダジャレ、語呂合わせ、同音異義語、回文など、言葉の音や意味の面白さを活かせるお題にしてください。",
        Category::Current => "時事問題や最新のトレンド、流行を題材にした大喜利のお題を作成してください。ニュース、SNSの話題、新しい技術、社会現象などを取り入れたお題にしてください。",
        Category::Character => "キャラクターや人物を題材にした大喜利のお題を作成してください。有名人、歴史上の人物、アニメキャラクター、職業の人など、人物の特徴を活かしたお題にしてください。",
        Category::Place => "場所や風景を題材にした大喜利のお題を作成してください。観光地、建物、自然、都市など、場所の特徴や雰囲気を活かしたお題にしてください。",
        Category::Object => "物や道具を題材にした大喜利のお題を作成してください。日用品、電化製品、文房具、食器など、物の形や用途の面白さを活かしたお題にしてください。",
        Category::Emotion => "感情や気持ち、心境を表現する大喜利のお題を作成してください。喜び、悲しみ、怒り、驚き、恥ずかしさなど、感情の微妙な変化や表現を活かしたお題にしてください。",
        Category::Fantasy => "ファンタジーや空想的な世界を題材にした大喜利のお題を作成してください。魔法、ドラゴン、異世界、超能力など、現実離れした設定を活かしたお題にしてください。",
        Category::Food => "食べ物や料理を題材にした大喜利のお題を作成してください。食材、調理法、食事の場面、グルメなど、食に関する様々な要素を活かしたお題にしてください。",
        Category::Work => "仕事や職業を題材にした大喜利のお題を作成してください。会社員、職人、接客業、専門職など、職業の特徴や仕事場面を活かしたお題にしてください。",
        Category::Family => "家族や人間関係を題材にした大喜利のお題を作成してください。親子、夫婦、兄弟、友人、恋人など、人間関係の微妙さや温かさを活かしたお題にしてください。",
    }
}

/// Instruction paragraph for a difficulty level
pub fn difficulty_prompt(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "初心者でも答えやすい、シンプルで分かりやすいお題にしてください。一般的な知識で回答でき、答えの方向性が想像しやすいお題にしてください。",
        Difficulty::Medium => "少し考える必要がある、適度にひねりの効いたお題にしてください。創造性が求められつつも、極端に難しくない程度の発想力で答えられるお題にしてください。",
        Difficulty::Hard => "高度な発想力や創造性が必要な、上級者向けのお題にしてください。複雑な設定や制約があり、独創的なアイデアが求められるお題にしてください。",
    }
}
